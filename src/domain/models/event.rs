use tui_textarea::Input;

pub enum Event {
    ChannelClosed(),
    ChannelError(String),
    ChannelMessage(String),
    ChannelOpened(),
    KeyboardCTRLC(),
    KeyboardCTRLN(),
    KeyboardCTRLO(),
    KeyboardCTRLR(),
    KeyboardCharInput(Input),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    KeyboardTab(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
