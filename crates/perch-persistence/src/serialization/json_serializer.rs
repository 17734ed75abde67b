use crate::traits::Serializer;
use perch_core::PerchResult;

/// JSON serializer for persisted records
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> PerchResult<Vec<u8>> {
        let json = serde_json::to_vec_pretty(data)
            .map_err(|e| perch_core::PerchError::Serialization(e.to_string()))?;
        Ok(json)
    }

    fn deserialize(&self, bytes: &[u8]) -> PerchResult<T> {
        let data = serde_json::from_slice(bytes)
            .map_err(|e| perch_core::PerchError::Serialization(e.to_string()))?;
        Ok(data)
    }
}
