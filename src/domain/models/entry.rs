use super::Choice;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

/// A single rendered row of the message log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Bot { text: String, avatar: bool },
    User { text: String },
    ChoiceGroup { group_id: String, choices: Vec<Choice> },
    Selected { text: String },
}

impl Entry {
    pub fn alignment(&self) -> BubbleAlignment {
        match self {
            Entry::Bot { .. } | Entry::ChoiceGroup { .. } => return BubbleAlignment::Left,
            Entry::User { .. } | Entry::Selected { .. } => return BubbleAlignment::Right,
        }
    }

    pub fn has_avatar(&self) -> bool {
        if let Entry::Bot { avatar, .. } = self {
            return *avatar;
        }

        return false;
    }
}
