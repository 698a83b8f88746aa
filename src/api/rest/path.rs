/// Barlink REST endpoints, served under the `/v1` prefix.
#[derive(Clone, Copy, Debug)]
pub enum ApiPath {
    Places,
    Events,
    Drinks,
    Friends,
    UserSearch,
}

impl ApiPath {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiPath::Places => "/v1/places",
            ApiPath::Events => "/v1/events",
            ApiPath::Drinks => "/v1/drinks",
            ApiPath::Friends => "/v1/friends",
            ApiPath::UserSearch => "/v1/users",
        }
    }
}

impl From<ApiPath> for String {
    fn from(value: ApiPath) -> Self {
        value.as_str().to_string()
    }
}
