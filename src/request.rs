//! Generation request derived from the inbound body

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use log::trace;

/// Prompt used when the body has none (or a falsy one)
pub const DEFAULT_PROMPT: &str = "Say hello in one sentence.";

/// Default generation cap
pub const DEFAULT_MAX_TOKENS: i64 = 256;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Resolved parameters for one generation call.
/// Only coerced, never range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// The prompt text, after defaulting
    pub prompt: String
  , /// Max tokens to generate
    pub max_tokens: i64
  , /// Temperature for sampling
    pub temperature: f64
}

impl GenerationRequest
{   /// Pull `prompt`, `max_tokens` and `temperature` out of a parsed body
    pub fn from_body(
      body: &Map<String, Value>
    ) -> Result<Self, crate::error::Error>
    {   let request = GenerationRequest
        {   prompt: coerce_prompt(body.get("prompt"))?
          , max_tokens: coerce_max_tokens(body.get("max_tokens"))?
          , temperature: coerce_temperature(body.get("temperature"))?
        };
        trace!("Resolved generation request: {:?}", request);
        Ok(request)
    }
}

fn is_falsy(value: &Value) -> bool
{   match value
    {   Value::Null => true
      , Value::Bool(b) => !b
      , Value::Number(n) => n.as_f64() == Some(0.0)
      , Value::String(s) => s.is_empty()
      , Value::Array(a) => a.is_empty()
      , Value::Object(o) => o.is_empty()
    }
}

/// Falsy or absent -> default prompt; strings pass through;
/// any other truthy value is rejected.
pub fn coerce_prompt(
  value: Option<&Value>
) -> Result<String, crate::error::Error>
{   match value
    {   None => Ok(DEFAULT_PROMPT.to_string())
      , Some(v) if is_falsy(v) => Ok(DEFAULT_PROMPT.to_string())
      , Some(Value::String(s)) => Ok(s.clone())
      , Some(other) => Err(crate::error::Error::coercion(
          "prompt",
          format!("expected a string, got {}", other)
        ))
    }
}

/// Integer coercion: integers pass, floats truncate toward zero,
/// booleans are 1/0, numeric strings are parsed after trimming.
pub fn coerce_max_tokens(
  value: Option<&Value>
) -> Result<i64, crate::error::Error>
{   let field = "max_tokens";
    let value = match value
    {   None => return Ok(DEFAULT_MAX_TOKENS)
      , Some(v) => v
    };

    match value
    {   Value::Bool(b) => Ok(i64::from(*b))
      , Value::Number(n) => {
          if let Some(i) = n.as_i64()
          {   return Ok(i);
          }
          match n.as_f64()
          {   Some(f) if f.is_finite()
                && f.trunc() >= i64::MIN as f64
                && f.trunc() < i64::MAX as f64 => {
                Ok(f.trunc() as i64)
              }
            , _ => Err(crate::error::Error::coercion(
                field,
                format!("{} is out of range", n)
              ))
          }
        }
      , Value::String(s) => {
          s.trim().parse::<i64>().map_err(|e| {
            crate::error::Error::coercion(
              field,
              format!("{:?} is not an integer ({})", s, e)
            )
          })
        }
      , other => Err(crate::error::Error::coercion(
          field,
          format!("expected an integer, got {}", other)
        ))
    }
}

/// Float coercion: numbers pass, booleans are 1.0/0.0,
/// numeric strings are parsed after trimming.
/// Non-finite results cannot be sent as JSON and are rejected.
pub fn coerce_temperature(
  value: Option<&Value>
) -> Result<f64, crate::error::Error>
{   let field = "temperature";
    let value = match value
    {   None => return Ok(DEFAULT_TEMPERATURE)
      , Some(v) => v
    };

    let parsed = match value
    {   Value::Bool(b) => if *b { 1.0 } else { 0.0 }
      , Value::Number(n) => n.as_f64().ok_or_else(|| {
          crate::error::Error::coercion(
            field,
            format!("{} is not representable as a float", n)
          )
        })?
      , Value::String(s) => {
          s.trim().parse::<f64>().map_err(|e| {
            crate::error::Error::coercion(
              field,
              format!("{:?} is not a number ({})", s, e)
            )
          })?
        }
      , other => return Err(crate::error::Error::coercion(
          field,
          format!("expected a number, got {}", other)
        ))
    };

    if !parsed.is_finite()
    {   return Err(crate::error::Error::coercion(
          field,
          format!("{} is not finite", parsed)
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_uses_defaults()
    {   let request = GenerationRequest::from_body(&Map::new())
          .unwrap();
        assert_eq!(request.prompt, DEFAULT_PROMPT);
        assert_eq!(request.max_tokens, 256);
        assert_eq!(request.temperature, 0.2);
    }

    #[test]
    fn falsy_prompts_fall_back_to_default()
    {   for v in [json!(null), json!(""), json!(0), json!(false), json!([]), json!({})]
        {   assert_eq!(
              coerce_prompt(Some(&v)).unwrap(),
              DEFAULT_PROMPT,
              "value {}", v
            );
        }
    }

    #[test]
    fn truthy_non_string_prompt_is_rejected()
    {   let err = coerce_prompt(Some(&json!(42))).unwrap_err();
        assert!(matches!(
          err,
          crate::error::Error::Coercion { field: "prompt", .. }
        ));
    }

    #[test]
    fn max_tokens_coercions()
    {   assert_eq!(coerce_max_tokens(Some(&json!(10))).unwrap(), 10);
        assert_eq!(coerce_max_tokens(Some(&json!(7.9))).unwrap(), 7);
        assert_eq!(coerce_max_tokens(Some(&json!(-7.9))).unwrap(), -7);
        assert_eq!(coerce_max_tokens(Some(&json!(" 42 "))).unwrap(), 42);
        assert_eq!(coerce_max_tokens(Some(&json!(true))).unwrap(), 1);
        // negative values are not range-checked here
        assert_eq!(coerce_max_tokens(Some(&json!(-5))).unwrap(), -5);
    }

    #[test]
    fn max_tokens_rejects_non_numeric()
    {   for v in [json!("ten"), json!("3.5"), json!(null), json!([1]), json!({"n": 1}), json!(1e300)]
        {   assert!(
              coerce_max_tokens(Some(&v)).is_err(),
              "value {} should fail", v
            );
        }
    }

    #[test]
    fn temperature_coercions()
    {   assert_eq!(coerce_temperature(Some(&json!(0))).unwrap(), 0.0);
        assert_eq!(coerce_temperature(Some(&json!(0.7))).unwrap(), 0.7);
        assert_eq!(coerce_temperature(Some(&json!("0.5"))).unwrap(), 0.5);
        assert_eq!(coerce_temperature(Some(&json!(false))).unwrap(), 0.0);
    }

    #[test]
    fn temperature_rejects_non_numeric_and_non_finite()
    {   for v in [json!("warm"), json!("nan"), json!("inf"), json!(null), json!([])]
        {   assert!(
              coerce_temperature(Some(&v)).is_err(),
              "value {} should fail", v
            );
        }
    }
}
