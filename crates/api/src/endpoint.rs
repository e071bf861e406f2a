use std::fmt;

use reqwest::Method;

/// The fixed routes exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SearchVectors,
    InsertData,
    DeleteData,
    CreateCollection,
    DeleteCollection,
    Details,
    Resources,
}

impl Endpoint {
    pub const ALL: [Self; 7] = [
        Self::SearchVectors,
        Self::InsertData,
        Self::DeleteData,
        Self::CreateCollection,
        Self::DeleteCollection,
        Self::Details,
        Self::Resources,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::SearchVectors => "/search-vectors/",
            Self::InsertData => "/insert-data/",
            Self::DeleteData => "/delete-data/",
            Self::CreateCollection => "/create-collection/",
            Self::DeleteCollection => "/delete-collection/",
            Self::Details => "/details/",
            Self::Resources => "/resources/",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::Resources => Method::GET,
            _ => Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resources_is_a_get() {
        for ep in Endpoint::ALL {
            let expected = if ep == Endpoint::Resources {
                Method::GET
            } else {
                Method::POST
            };
            assert_eq!(ep.method(), expected, "{ep}");
            assert!(ep.path().starts_with('/') && ep.path().ends_with('/'));
        }
    }
}
