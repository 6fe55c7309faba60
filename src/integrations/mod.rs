// src/integrations/mod.rs
//
// External Integrations Module
//
// - sdk: wallet and contract SDK traits plus the HTTP bridge client
// - explorer: block-explorer and share links

pub mod explorer;
pub mod sdk;

pub use explorer::ExplorerLinks;
pub use sdk::{
    BurnType, ContractSdk, HttpSdkGateway, MintType, NftCollectionDeployParams, NftMintMetadata,
    SdkError, SdkResult, TokenDeployParams, TransactionReceipt, WalletBalance, WalletProvider,
};
