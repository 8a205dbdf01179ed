/// Configuration for the email-relay client.
///
/// # Examples
///
/// ```
/// use courier_relay::RelayConfig;
///
/// let config = RelayConfig::new("smtp.example.com", "noreply@example.com", "secret")
///     .with_sender_name("Example");
/// assert_eq!(config.sender_address, "noreply@example.com");
/// assert_eq!(config.body_encoding, "quoted-printable");
/// ```
#[derive(Clone)]
pub struct RelayConfig {
    /// Relay endpoint URL.
    pub endpoint: String,

    /// Optional value for the `Authorization` header.
    pub authorization: Option<String>,

    /// SMTP server the relay connects to.
    pub smtp_host: String,

    /// SMTP username.
    pub smtp_username: String,

    /// SMTP password.
    pub smtp_password: String,

    /// `From` address.
    pub sender_address: String,

    /// `From` display name.
    pub sender_name: String,

    /// Body content type understood by the relay (`"html"`).
    pub body_type: String,

    /// Transfer encoding of the body (`"quoted-printable"`).
    pub body_encoding: String,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "[REDACTED]"),
            )
            .field("smtp_host", &self.smtp_host)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("sender_address", &self.sender_address)
            .field("sender_name", &self.sender_name)
            .field("body_type", &self.body_type)
            .field("body_encoding", &self.body_encoding)
            .finish()
    }
}

impl RelayConfig {
    /// Create a configuration for the production relay endpoint.
    ///
    /// The SMTP username doubles as the sender address.
    pub fn new(
        smtp_host: impl Into<String>,
        smtp_username: impl Into<String>,
        smtp_password: impl Into<String>,
    ) -> Self {
        let smtp_username = smtp_username.into();
        Self {
            endpoint: "https://api.mailgrid.net.br/send/".to_owned(),
            authorization: None,
            smtp_host: smtp_host.into(),
            sender_address: smtp_username.clone(),
            smtp_username,
            smtp_password: smtp_password.into(),
            sender_name: "Odos".to_owned(),
            body_type: "html".to_owned(),
            body_encoding: "quoted-printable".to_owned(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_sender_address(mut self, address: impl Into<String>) -> Self {
        self.sender_address = address.into();
        self
    }

    #[must_use]
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self
    }
}
