//! Serializes an [`ItemStack`] to a base64 string column value, or
//! deserializes it back. The binary form inside the base64 wrapper is the
//! host-native encoding; the catalog never inspects it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::error::SystemError;
use crate::host::stack::ItemStack;

/// Serialize an [`ItemStack`] to a base64 string.
pub fn stack_to_base64(stack: &ItemStack) -> Result<String, SystemError> {
    let bytes = bincode::serialize(stack)?;
    Ok(STANDARD.encode(bytes))
}

/// Deserialize a base64 string back into an [`ItemStack`].
pub fn stack_from_base64(data: &str) -> Result<ItemStack, SystemError> {
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| SystemError::BlobEncoding(e.to_string()))?;
    Ok(bincode::deserialize(&bytes)?)
}
