use std::fmt;

use alloy::primitives::Address;

use super::ContractName;

/// A confirmed contract deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    pub name: ContractName,
    pub address: Address,
}

/// Deployment records of one run, always a prefix of [`ContractName::DEPLOY_ORDER`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentSummary {
    records: Vec<DeploymentRecord>,
}

impl DeploymentSummary {
    /// The contract that must be recorded next, if any
    pub fn next_contract(&self) -> Option<ContractName> {
        ContractName::DEPLOY_ORDER.get(self.records.len()).copied()
    }

    pub fn push(&mut self, record: DeploymentRecord) {
        debug_assert_eq!(
            Some(record.name),
            self.next_contract(),
            "deployment recorded out of order"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[DeploymentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True once every contract of the suite has been confirmed
    pub fn is_complete(&self) -> bool {
        self.next_contract().is_none()
    }
}

impl fmt::Display for DeploymentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Deployment Summary ===")?;
        for record in &self.records {
            writeln!(f, "{}: {}", record.name, record.address)?;
        }
        Ok(())
    }
}
