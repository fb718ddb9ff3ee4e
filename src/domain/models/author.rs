use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// The two roles a transcript entry can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return Config::get(ConfigKey::Username),
            Author::Assistant => return Config::get(ConfigKey::Model),
        }
    }
}
