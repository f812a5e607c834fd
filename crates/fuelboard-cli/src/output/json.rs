use std::io;

use fuelboard_client::{ClientError, ErrorContract, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "overview" | "overconsumption" | "consumption" | "categories" | "dash" => {
            serialize_json_pretty(&json!({
                "ok": true,
                "version": JSON_VERSION,
                "data": success.data,
            }))
        }
        _ => Err(io::Error::other(format!(
            "JSON output is not supported for command `{}`",
            success.command
        ))),
    }
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let payload = json!({
        "error": ErrorContract::from(error),
    });
    serialize_json_pretty(&payload)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use fuelboard_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn success_json_uses_versioned_envelope() {
        let rendered = render_success_json(&success(
            "categories",
            json!({ "source": "Data.csv", "default": "All", "options": ["All"] }),
        ));

        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], Value::String("v1".to_string()));
                assert_eq!(value["data"]["options"][0], Value::String("All".to_string()));
            }
        }
    }

    #[test]
    fn error_json_uses_universal_shape() {
        let error = ClientError::new(
            "schema_error",
            "CSV headers are missing required columns: ODO Diff.",
            vec!["Include every required header.".to_string()],
        );
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("schema_error".to_string())
                );
                assert!(value.get("ok").is_none());
            }
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(render_success_json(&success("export", json!({}))).is_err());
    }
}
