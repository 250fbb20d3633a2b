use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use eyre::{Result, WrapErr, eyre};
use serde_json::Value;

use super::ContractName;
use crate::project::Project;

/// Hardhat keeps compiler inputs/outputs here; they are not contract artifacts
const BUILD_INFO_DIR: &str = "build-info";

/// Compiled contract ready for deployment
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: ContractName,
    pub path: PathBuf,
    pub bytecode: Bytes,
}

/// Locates and parses compiled artifacts for a project
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(project: &Project) -> Self {
        Self {
            artifacts_dir: project.artifacts_dir.clone(),
        }
    }

    /// Load the artifact of a contract.
    ///
    /// Both Hardhat (`artifacts/contracts/<File>.sol/<Name>.json`) and Foundry
    /// (`out/<File>.sol/<Name>.json`) layouts are searched. The source file
    /// name may differ from the contract name, so every `*.sol` directory is
    /// considered and more than one match is an error.
    pub fn load(&self, name: ContractName) -> Result<Artifact> {
        if !self.artifacts_dir.exists() {
            return Err(eyre!(
                "Artifacts directory {:?} does not exist; compile the contracts first",
                self.artifacts_dir
            ));
        }

        let file_name = format!("{}.json", name.as_str());
        let mut matches = Vec::new();
        find_artifacts(&self.artifacts_dir, &file_name, &mut matches)?;

        let path = match matches.len() {
            0 => {
                return Err(eyre!(
                    "No artifact for {} under {:?}",
                    name,
                    self.artifacts_dir
                ));
            }
            1 => matches.remove(0),
            _ => {
                return Err(eyre!(
                    "Multiple artifacts for {}: {:?}",
                    name,
                    matches
                ));
            }
        };

        let content =
            fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read {:?}", path))?;
        let artifact: Value = serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse {:?}", path))?;

        if let Some(abi) = artifact.get("abi") {
            let inputs = constructor_inputs(abi);
            if !inputs.is_empty() {
                return Err(eyre!(
                    "{} requires constructor arguments ({}), which are not supported",
                    name,
                    inputs.join(", ")
                ));
            }
        }

        let bytecode = parse_bytecode(&artifact)
            .wrap_err_with(|| format!("Invalid bytecode in {:?}", path))?;

        tracing::debug!("Loaded {} artifact from {:?}", name, path);

        Ok(Artifact {
            name,
            path,
            bytecode,
        })
    }
}

fn find_artifacts(dir: &Path, file_name: &str, matches: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).wrap_err_with(|| format!("Failed to read {:?}", dir))?;

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == BUILD_INFO_DIR) {
                continue;
            }
            find_artifacts(&path, file_name, matches)?;
        } else if path.file_name().is_some_and(|n| n == file_name)
            && dir
                .file_name()
                .is_some_and(|n| n.to_string_lossy().ends_with(".sol"))
        {
            matches.push(path);
        }
    }

    Ok(())
}

/// Types of the constructor parameters declared in an ABI
fn constructor_inputs(abi: &Value) -> Vec<String> {
    abi.as_array()
        .and_then(|items| {
            items
                .iter()
                .find(|item| item.get("type").and_then(|t| t.as_str()) == Some("constructor"))
        })
        .and_then(|ctor| ctor.get("inputs"))
        .and_then(|inputs| inputs.as_array())
        .map(|inputs| {
            inputs
                .iter()
                .filter_map(|param| param.get("type").and_then(|t| t.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Hardhat stores `bytecode` as a hex string, Foundry as `{ "object": "0x.." }`
fn parse_bytecode(artifact: &Value) -> Result<Bytes> {
    let field = artifact
        .get("bytecode")
        .ok_or_else(|| eyre!("Artifact has no bytecode field"))?;

    let hex_str = field
        .as_str()
        .or_else(|| field.get("object").and_then(|o| o.as_str()))
        .ok_or_else(|| eyre!("Unrecognized bytecode format"))?;

    let clean = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if clean.is_empty() {
        return Err(eyre!(
            "Bytecode is empty; abstract contracts and interfaces cannot be deployed"
        ));
    }
    if clean.contains("__") {
        return Err(eyre!("Bytecode contains unlinked library placeholders"));
    }

    let bytes = hex::decode(clean).wrap_err("Bytecode is not valid hex")?;
    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;

    fn store(dir: &Path) -> ArtifactStore {
        ArtifactStore::new(&Project {
            project_type: ProjectType::Hardhat,
            root: dir.to_path_buf(),
            name: "fixture".to_string(),
            artifacts_dir: dir.join("artifacts"),
        })
    }

    fn write_artifact(root: &Path, rel_dir: &str, name: &str, body: &str) {
        let dir = root.join("artifacts").join(rel_dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", name)), body).unwrap();
    }

    #[test]
    fn test_load_hardhat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "contracts/GMContract.sol",
            "GMContract",
            r#"{
                "contractName": "GMContract",
                "abi": [{"type": "function", "name": "gm", "inputs": [], "outputs": []}],
                "bytecode": "0x6080604052"
            }"#,
        );
        // Debug files live next to the artifact and must be ignored
        write_artifact(
            dir.path(),
            "contracts/GMContract.sol",
            "GMContract.dbg",
            r#"{"buildInfo": "../../build-info/abc.json"}"#,
        );

        let artifact = store(dir.path()).load(ContractName::GmContract).unwrap();
        assert_eq!(artifact.name, ContractName::GmContract);
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_load_foundry_artifact_from_differently_named_source() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "Factories.sol",
            "NFTFactory",
            r#"{"abi": [], "bytecode": {"object": "0x00ff", "linkReferences": {}}}"#,
        );

        let artifact = store(dir.path()).load(ContractName::NftFactory).unwrap();
        assert_eq!(artifact.bytecode.to_vec(), vec![0x00, 0xff]);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("artifacts/contracts")).unwrap();

        let err = store(dir.path())
            .load(ContractName::Erc20TokenFactory)
            .unwrap_err();
        assert!(err.to_string().contains("No artifact for ERC20TokenFactory"));
    }

    #[test]
    fn test_missing_artifacts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = store(dir.path()).load(ContractName::GmContract).unwrap_err();
        assert!(err.to_string().contains("compile the contracts first"));
    }

    #[test]
    fn test_ambiguous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"{"abi": [], "bytecode": "0x00"}"#;
        write_artifact(dir.path(), "contracts/a/GMContract.sol", "GMContract", body);
        write_artifact(dir.path(), "contracts/b/GMContract.sol", "GMContract", body);

        let err = store(dir.path()).load(ContractName::GmContract).unwrap_err();
        assert!(err.to_string().contains("Multiple artifacts"));
    }

    #[test]
    fn test_build_info_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "build-info/GMContract.sol",
            "GMContract",
            r#"{"abi": [], "bytecode": "0x00"}"#,
        );

        assert!(store(dir.path()).load(ContractName::GmContract).is_err());
    }

    #[test]
    fn test_constructor_arguments_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "contracts/GMContract.sol",
            "GMContract",
            r#"{
                "abi": [{"type": "constructor", "inputs": [{"name": "owner", "type": "address"}]}],
                "bytecode": "0x6080"
            }"#,
        );

        let err = store(dir.path()).load(ContractName::GmContract).unwrap_err();
        assert!(err.to_string().contains("constructor arguments (address)"));
    }

    #[test]
    fn test_parse_bytecode_rejects_undeployable_code() {
        let empty = serde_json::json!({ "bytecode": "0x" });
        assert!(parse_bytecode(&empty).is_err());

        let unlinked = serde_json::json!({
            "bytecode": { "object": "0x6080__$1234567890abcdef1234567890abcdef12$__" }
        });
        assert!(parse_bytecode(&unlinked).is_err());

        let missing = serde_json::json!({ "abi": [] });
        assert!(parse_bytecode(&missing).is_err());
    }
}
