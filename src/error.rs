use std::fmt;

/// Every way a single invocation can fail.
/// All variants end up in the same 500 envelope; the variant
/// only decides how the message reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Inbound body was flagged base64 but did not decode to UTF-8 text
    Decode(String)
  , /// Malformed JSON, either inbound or from the remote service
    Parse(String)
  , /// A body field could not be coerced to the expected type
    Coercion
    {   field: &'static str
      , reason: String
    }
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// The remote generation call failed
    Remote(String)
  , /// Outbound request could not be serialized
    Serialize(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Decode(msg) => {
              write!(f, "Decode error: {}", msg)
            }
          , Error::Parse(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Coercion { field, reason } => {
              write!(f, "Invalid value for {}: {}", field, reason)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Remote(msg) => {
              write!(f, "Remote call failed: {}", msg)
            }
          , Error::Serialize(msg) => {
              write!(f, "Serialize error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::Parse(e.to_string())
    }
}

impl From<base64::DecodeError> for Error
{   fn from(e: base64::DecodeError) -> Self
    {   Error::Decode(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error
{   fn from(e: std::string::FromUtf8Error) -> Self
    {   Error::Decode(e.to_string())
    }
}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl Error
{   /// Shorthand for a coercion failure on `field`
    pub fn coercion(
      field: &'static str
    , reason: impl Into<String>
    ) -> Self
    {   Error::Coercion
        {   field
          , reason: reason.into()
        }
    }
}
