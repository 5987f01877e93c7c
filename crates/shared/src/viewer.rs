/// Identity a read operation is evaluated for.
///
/// Derived flags such as `is_favorited` are always false for an anonymous
/// viewer, so callers pass this explicitly instead of looking up a request
/// global.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(String),
}

impl Viewer {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(id),
        }
    }
}
