//! Opaque serialization of a container
//!
//! The blob captures `(data tree, delimiter set, force-create flag)`.
//! Restoring trusts the stored tree and does not re-normalize it.

use serde::{Deserialize, Serialize};

use super::core::PathedContainer;
use super::node::Node;
use crate::config::{ContainerConfig, Validator};
use crate::error::SnapshotError;

#[derive(Serialize, Deserialize)]
struct Snapshot(Node, Vec<String>, bool);

impl PathedContainer {
    /// Serialize the addressed tree and its configuration
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Encode` if the tree cannot be encoded.
    pub fn to_blob(&self) -> Result<Vec<u8>, SnapshotError> {
        let snapshot = Snapshot(
            self.data(),
            self.config.delimiters.clone(),
            self.config.force_create,
        );
        serde_json::to_vec(&snapshot).map_err(SnapshotError::Encode)
    }

    /// Restore a container from [`PathedContainer::to_blob`] output
    ///
    /// The access policy is not part of the blob and resets to the default.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Decode` for a malformed blob and
    /// `SnapshotError::Config` when it carries an invalid delimiter set.
    pub fn from_blob(blob: &[u8]) -> Result<Self, SnapshotError> {
        let Snapshot(data, delimiters, force_create) =
            serde_json::from_slice(blob).map_err(SnapshotError::Decode)?;

        let config = ContainerConfig::default()
            .with_delimiters(delimiters)
            .with_force_create(force_create);
        config.validate()?;

        log::debug!("restored container snapshot ({} leaves)", data.leaf_count());
        Ok(Self::from_node(data, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blob_restores_equivalent_container() {
        let mut data =
            PathedContainer::with_delimiters(json!({"a": {"b": [1, 2]}}), [".", "/"]).unwrap();
        data.set_force_create(true);

        let restored = PathedContainer::from_blob(&data.to_blob().unwrap()).unwrap();
        assert_eq!(restored.data(), data.data());
        assert_eq!(restored.delimiters(), data.delimiters());
        assert!(restored.force_create());
        assert_eq!(restored.get_value("a/b/1"), Some(json!(2)));
    }

    #[test]
    fn restoring_does_not_split_stored_keys() {
        let mut data = PathedContainer::new(json!({}));
        data.set_node(["k"], Node::from(json!({"x.y": 1}))).unwrap();

        let restored = PathedContainer::from_blob(&data.to_blob().unwrap()).unwrap();
        assert!(restored.with_node("k", |node| node.child("x.y").is_some()).unwrap());
    }

    #[test]
    fn garbage_blob_is_rejected() {
        assert!(matches!(
            PathedContainer::from_blob(b"not a blob"),
            Err(SnapshotError::Decode(_))
        ));
    }
}
