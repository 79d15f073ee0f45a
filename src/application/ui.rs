use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Launcher;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AssistantWidget;
use crate::domain::services::CookieJar;

struct View<'a> {
    bot_name: String,
    last_error: Option<String>,
    launcher: Launcher,
    textarea: tui_textarea::TextArea<'a>,
}

impl<'a> View<'a> {
    fn reset_textarea(&mut self, widget: &AssistantWidget) {
        self.textarea = TextArea::new(widget.editor().placeholder());
    }
}

fn render_header<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    widget: &AssistantWidget,
    view: &View,
) {
    let (dot_color, status) = match (widget.is_connected(), &view.last_error) {
        (true, _) => (Color::Green, "connected".to_string()),
        (false, Some(err)) => (Color::Red, format!("disconnected: {err} (CTRL+N to retry)")),
        (false, None) => (Color::Red, "disconnected (CTRL+N to connect)".to_string()),
    };

    let line = Line::from(vec![
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(
            view.bot_name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        ),
        rect,
    );
}

fn render_footer<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    widget: &AssistantWidget,
    view: &View,
) {
    if widget.editor().is_editable() {
        frame.render_widget(view.textarea.widget(), rect);
        return;
    }

    frame.render_widget(
        Paragraph::new(widget.editor().placeholder().to_string())
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .block(TextArea::block("Message")),
        rect,
    );
}

fn render<B: Backend>(frame: &mut Frame<B>, widget: &mut AssistantWidget, view: &View) {
    if !widget.is_open() {
        let area = frame.size();
        view.launcher.render(frame, area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    if layout[1].width != widget.last_known_width || layout[1].height != widget.last_known_height
    {
        widget.set_rect(layout[1]);
    }

    render_header(frame, layout[0], widget, view);

    widget
        .bubble_list
        .render(frame, layout[1], widget.scroll.position);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[1].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut widget.scroll.scrollbar_state,
    );

    render_footer(frame, layout[2], widget, view);
}

fn handle_choice_keys(widget: &mut AssistantWidget, input: Input) -> Result<()> {
    match input {
        Input {
            key: Key::Char(char),
            ctrl: false,
            alt: false,
        } if ('1'..='9').contains(&char) => {
            let idx = char as usize - '1' as usize;
            widget.pick_choice_at(idx)?;
        }
        Input { key: Key::Right, .. } => {
            widget.focus_next_choice();
        }
        Input { key: Key::Left, .. } => {
            widget.focus_previous_choice();
        }
        _ => (),
    }

    return Ok(());
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    widget: &mut AssistantWidget,
    events: &mut EventsService,
) -> Result<()> {
    let mut view = View {
        bot_name: Config::get(ConfigKey::BotName),
        last_error: None,
        launcher: Launcher::new(&Config::get(ConfigKey::BotName)),
        textarea: TextArea::new(widget.editor().placeholder()),
    };

    #[cfg(feature = "dev")]
    {
        let fixtures = [
            r#"{"kind":"BotText","content":"Hello! I am a development fixture."}"#,
            r#"{"kind":"ChoiceRequest","groupId":"dev","question":"Would you like to continue?","choices":[{"itemId":"a","content":"Yes"},{"itemId":"b","content":"No"}]}"#,
        ];
        for fixture in fixtures {
            widget.handle_inbound(fixture);
        }
    }

    loop {
        terminal.draw(|frame| render(frame, widget, &view))?;

        let was_editable = widget.editor().is_editable();
        let placeholder = widget.editor().placeholder().to_string();

        match events.next().await? {
            Event::ChannelOpened() => {
                view.last_error = None;
                widget.set_connected(true);
            }
            Event::ChannelClosed() => {
                widget.set_connected(false);
            }
            Event::ChannelError(err) => {
                tracing::error!(error = err.as_str(), "Channel error");
                view.last_error = Some(err);
            }
            Event::ChannelMessage(raw) => {
                widget.handle_inbound(&raw);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLN() => {
                widget.connect()?;
            }
            Event::KeyboardCTRLO() => {
                if widget.is_open() {
                    widget.close();
                } else {
                    widget.open();
                }
            }
            Event::KeyboardCTRLR() => {
                widget.reset().await?;
            }
            Event::KeyboardEsc() => {
                widget.close();
            }
            Event::KeyboardEnter() => {
                if !widget.is_open() {
                    widget.open();
                    continue;
                }

                let input_str = view.textarea.lines().join("\n");
                if widget.submit(&input_str)? {
                    view.reset_textarea(widget);
                }
            }
            Event::KeyboardTab() => {
                if widget.is_open() {
                    widget.focus_next_choice();
                }
            }
            Event::KeyboardPaste(text) => {
                if widget.is_open() && widget.editor().is_editable() {
                    TextArea::paste(&mut view.textarea, &text);
                }
            }
            Event::KeyboardCharInput(input) => {
                if !widget.is_open() {
                    continue;
                }

                let arrow = matches!(input.key, Key::Left | Key::Right);
                let moves_focus = arrow && view.textarea.is_empty() && widget.has_open_choices();
                if widget.editor().is_editable() && !moves_focus {
                    view.textarea.input(input);
                } else {
                    handle_choice_keys(widget, input)?;
                }
            }
            Event::UIScrollDown() => {
                widget.scroll.down();
            }
            Event::UIScrollUp() => {
                widget.scroll.up();
            }
            Event::UIScrollPageDown() => {
                widget.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                widget.scroll.up_page();
            }
            Event::UITick() => {
                continue;
            }
        }

        if was_editable != widget.editor().is_editable()
            || placeholder != widget.editor().placeholder()
        {
            view.reset_textarea(widget);
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut widget = AssistantWidget::new(
        &Config::get(ConfigKey::BotName),
        &Config::get(ConfigKey::Username),
        CookieJar::default(),
        tx,
    );
    let mut events = EventsService::new(rx);

    start_loop(&mut terminal, &mut widget, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
