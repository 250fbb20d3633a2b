use std::fmt;

/// The contracts of the suite, in deployment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractName {
    GmContract,
    Erc20TokenFactory,
    NftFactory,
}

impl ContractName {
    /// Each contract is confirmed before the next one is submitted
    pub const DEPLOY_ORDER: [ContractName; 3] = [
        ContractName::GmContract,
        ContractName::Erc20TokenFactory,
        ContractName::NftFactory,
    ];

    /// Name of the contract as compiled, which is also its artifact file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::GmContract => "GMContract",
            ContractName::Erc20TokenFactory => "ERC20TokenFactory",
            ContractName::NftFactory => "NFTFactory",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
