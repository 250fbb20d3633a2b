mod artifact;
mod deployment;
mod names;

pub use artifact::{Artifact, ArtifactStore};
pub use deployment::{DeploymentRecord, DeploymentSummary};
pub use names::ContractName;
