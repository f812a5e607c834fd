use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

impl From<&ClientError> for ErrorContract {
    fn from(error: &ClientError) -> Self {
        Self {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        }
    }
}

pub fn success<T>(command: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data: json_data,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ErrorContract, success};
    use crate::ClientError;

    #[test]
    fn success_wraps_data_with_command_and_version() {
        let envelope = success("categories", json!({ "options": ["All"] }));
        assert!(envelope.is_ok());
        if let Ok(value) = envelope {
            assert!(value.ok);
            assert_eq!(value.command, "categories");
            assert_eq!(value.version, crate::API_VERSION);
            assert_eq!(value.data["options"][0], "All");
        }
    }

    #[test]
    fn error_contract_keeps_recovery_steps() {
        let error = ClientError::empty_input("Fuel Qty");
        let contract = ErrorContract::from(&error);
        assert_eq!(contract.code, "empty_input");
        assert_eq!(contract.recovery_steps.len(), 2);
    }
}
