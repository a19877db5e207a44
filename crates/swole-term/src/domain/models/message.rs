use super::Author;

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub enum MessageType {
    #[default]
    Normal,
    Error,
}

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub message_type: MessageType,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string().replace('\t', "  "),
            message_type: MessageType::Normal,
        };
    }

    pub fn new_with_type(author: Author, message_type: MessageType, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string().replace('\t', "  "),
            message_type,
        };
    }
}
