//! The subset of the Kubernetes `PodList` schema the collectors need.
//!
//! Unknown fields are ignored, and every field defaults, so both the
//! output of `kubectl get pods -A -o json` and raw `/api/v1/pods` responses
//! decode.

use serde::Deserialize;

use crate::core::{ContinuationToken, Record, RecordPage};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodList {
    #[serde(default)]
    pub metadata: PodListMetadata,
    #[serde(default)]
    pub items: Vec<Pod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodListMetadata {
    #[serde(default, rename = "continue")]
    pub continuation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub metadata: PodMetadata,
    #[serde(default)]
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub init_containers: Vec<Container>,
    #[serde(default)]
    pub ephemeral_containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub image: String,
}

/// Items are the images of `containers`, then `initContainers`, then
/// `ephemeralContainers`.
///
/// This is wider than reading `spec.containers` alone: an image used only by
/// an init or debug container is listed too, so the result can hold more
/// images than a containers-only listing of the same pods.
impl From<Pod> for Record {
    fn from(pod: Pod) -> Self {
        let PodSpec {
            containers,
            init_containers,
            ephemeral_containers,
        } = pod.spec;

        let items = containers
            .into_iter()
            .chain(init_containers)
            .chain(ephemeral_containers)
            .map(|container| container.image)
            .collect();

        Record::new(pod.metadata.namespace, pod.metadata.name, items)
    }
}

impl PodList {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.items.into_iter().map(Record::from).collect()
    }

    pub fn into_page(self) -> RecordPage {
        let continuation = ContinuationToken::from(self.metadata.continuation);
        RecordPage {
            records: self.items.into_iter().map(Record::from).collect(),
            continuation,
        }
    }
}
