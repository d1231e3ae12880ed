use api::model::Role;

/// Options for a token request. Defaults to a PUBLISHER token with no
/// server-side data and no media constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOptions {
    pub role: Role,
    pub data: String,
    pub kurento_options: Option<KurentoOptions>,
}

impl Default for TokenOptions {
    fn default() -> Self {
        TokenOptions {
            role: Role::Publisher,
            data: String::new(),
            kurento_options: None,
        }
    }
}

impl TokenOptions {
    pub fn builder() -> TokenOptionsBuilder {
        TokenOptionsBuilder::default()
    }
}

#[derive(Default)]
pub struct TokenOptionsBuilder {
    options: TokenOptions,
}

impl TokenOptionsBuilder {
    pub fn role(mut self, role: Role) -> Self {
        self.options.role = role;
        self
    }

    /// Secure server-side metadata attached to the connection that uses
    /// this token.
    pub fn data(mut self, data: &str) -> Self {
        self.options.data = data.to_owned();
        self
    }

    pub fn kurento_options(mut self, kurento_options: KurentoOptions) -> Self {
        self.options.kurento_options = Some(kurento_options);
        self
    }

    pub fn build(self) -> TokenOptions {
        self.options
    }
}

/// Media-pipeline constraints for the participant that uses the token.
/// Zero bandwidth means unconstrained and is left out of the request body,
/// as is an empty filter list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KurentoOptions {
    pub video_max_recv_bandwidth: i32,
    pub video_min_recv_bandwidth: i32,
    pub video_max_send_bandwidth: i32,
    pub video_min_send_bandwidth: i32,
    pub allowed_filters: Vec<String>,
}

impl KurentoOptions {
    pub(crate) fn into_request(self) -> api::request::KurentoOptions {
        fn nonzero(v: i32) -> Option<i32> {
            (v != 0).then_some(v)
        }
        api::request::KurentoOptions {
            video_max_recv_bandwidth: nonzero(self.video_max_recv_bandwidth),
            video_min_recv_bandwidth: nonzero(self.video_min_recv_bandwidth),
            video_max_send_bandwidth: nonzero(self.video_max_send_bandwidth),
            video_min_send_bandwidth: nonzero(self.video_min_send_bandwidth),
            allowed_filters: (!self.allowed_filters.is_empty()).then_some(self.allowed_filters),
        }
    }
}
