//! Stored item layout: one version byte followed by the postcard encoding.

use crate::store::StoreError;
use crate::types::RepositoryId;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub(crate) const RECORD_VERSION: u8 = 1;

pub(crate) fn encode<T: Serialize>(item: &T) -> Result<Vec<u8>, StoreError> {
    Ok(postcard::to_extend(item, vec![RECORD_VERSION])?)
}

pub(crate) fn decode<T: DeserializeOwned>(id: RepositoryId, data: &[u8]) -> Result<T, StoreError> {
    let (version, payload) = data.split_first().ok_or(StoreError::EmptyRecord(id))?;
    match *version {
        RECORD_VERSION => Ok(postcard::from_bytes(payload)?),
        version => Err(StoreError::UnsupportedVersion { id, version }),
    }
}

#[cfg(test)]
mod tests;
