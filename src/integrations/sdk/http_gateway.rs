// src/integrations/sdk/http_gateway.rs
//
// HTTP client for the local wallet/SDK bridge.
//
// Every call is a JSON POST to `{gateway_url}/{method}`. The bridge answers
// with an envelope holding either `result` or `error.message`; the message is
// passed through untouched so the UI can show it verbatim.
//
// This is INFRASTRUCTURE: it maps wire data into integration DTOs and never
// touches the cache.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    ContractSdk, NftCollectionDeployParams, NftMintMetadata, SdkError, SdkResult,
    TokenDeployParams, TransactionReceipt, WalletBalance, WalletProvider,
};
use crate::config::SdkConfig;
use crate::domain::NftMetadata;
use crate::error::{AppError, AppResult};

/// Bridge response wrapper
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectedAccount {
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeployedContract {
    address: String,
}

/// One item from `erc721.getAll`; the bridge omits fields the token lacks
#[derive(Debug, Default, Deserialize)]
struct RawNftMetadata {
    id: Option<Value>,
    uri: Option<String>,
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
}

impl From<RawNftMetadata> for NftMetadata {
    fn from(raw: RawNftMetadata) -> Self {
        let id = match raw.id {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        };

        NftMetadata {
            id,
            uri: raw.uri.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            image: raw.image.unwrap_or_default(),
        }
    }
}

/// Unwrap a bridge envelope into its result or the raw error message
fn decode_envelope<T: DeserializeOwned>(body: &str) -> SdkResult<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| SdkError::Transport(format!("Failed to parse bridge response: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(SdkError::Rejected(error.message));
    }

    envelope
        .result
        .ok_or_else(|| SdkError::Transport("Bridge returned no result".to_string()))
}

/// Wallet/SDK bridge client
pub struct HttpSdkGateway {
    base_url: String,
    http_client: Client,
}

impl HttpSdkGateway {
    pub fn new(config: &SdkConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    // ========================================================================
    // INTERNAL: request execution
    // ========================================================================

    async fn call<T>(&self, method: &str, params: Value) -> SdkResult<T>
    where
        T: DeserializeOwned,
    {
        log::debug!("SDK bridge call: {}", method);

        let response = self
            .http_client
            .post(self.endpoint(method))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&params)
            .send()
            .await
            .map_err(|e| SdkError::Transport(format!("Request to {} failed: {}", method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SdkError::Transport(format!("Failed to read bridge response: {}", e)))?;

        // Rejections come back as 4xx/5xx with an envelope; prefer its message
        match decode_envelope(&body) {
            Err(SdkError::Transport(_)) if !status.is_success() => Err(SdkError::Transport(
                format!("Bridge returned status: {}", status),
            )),
            other => other,
        }
    }
}

#[async_trait]
impl WalletProvider for HttpSdkGateway {
    async fn connected_address(&self) -> SdkResult<Option<String>> {
        let account: ConnectedAccount = self.call("wallet/address", json!({})).await?;
        Ok(account.address.filter(|a| !a.is_empty()))
    }

    async fn balance(&self) -> SdkResult<WalletBalance> {
        self.call("wallet/balance", json!({})).await
    }

    async fn send_native(&self, to: &str, amount: &str) -> SdkResult<TransactionReceipt> {
        self.call("wallet/send", json!({ "to": to, "value": amount })).await
    }
}

#[async_trait]
impl ContractSdk for HttpSdkGateway {
    async fn deploy_token(&self, params: &TokenDeployParams) -> SdkResult<String> {
        let deployed: DeployedContract = self.call("deployer/token", json!(params)).await?;
        Ok(deployed.address)
    }

    async fn deploy_nft_collection(
        &self,
        params: &NftCollectionDeployParams,
    ) -> SdkResult<String> {
        let deployed: DeployedContract = self.call("deployer/nft-collection", json!(params)).await?;
        Ok(deployed.address)
    }

    async fn erc20_mint(&self, contract: &str, amount: &str) -> SdkResult<TransactionReceipt> {
        self.call("erc20/mint", json!({ "contract": contract, "amount": amount }))
            .await
    }

    async fn erc20_burn(&self, contract: &str, amount: &str) -> SdkResult<TransactionReceipt> {
        self.call("erc20/burn", json!({ "contract": contract, "amount": amount }))
            .await
    }

    async fn erc20_transfer(
        &self,
        contract: &str,
        to: &str,
        amount: &str,
    ) -> SdkResult<TransactionReceipt> {
        self.call(
            "erc20/transfer",
            json!({ "contract": contract, "to": to, "amount": amount }),
        )
        .await
    }

    async fn erc721_mint(
        &self,
        contract: &str,
        metadata: &NftMintMetadata,
    ) -> SdkResult<TransactionReceipt> {
        self.call(
            "erc721/mint",
            json!({ "contract": contract, "metadata": metadata }),
        )
        .await
    }

    async fn erc721_burn(&self, contract: &str, token_id: &str) -> SdkResult<TransactionReceipt> {
        self.call(
            "erc721/burn",
            json!({ "contract": contract, "tokenId": token_id }),
        )
        .await
    }

    async fn erc721_transfer(
        &self,
        contract: &str,
        to: &str,
        token_id: &str,
    ) -> SdkResult<TransactionReceipt> {
        self.call(
            "erc721/transfer",
            json!({ "contract": contract, "to": to, "tokenId": token_id }),
        )
        .await
    }

    async fn erc721_get_all(&self, contract: &str) -> SdkResult<Vec<NftMetadata>> {
        let raw: Vec<RawNftMetadata> = self
            .call("erc721/get-all", json!({ "contract": contract }))
            .await?;
        Ok(raw.into_iter().map(NftMetadata::from).collect())
    }

    async fn set_approval_for_all(
        &self,
        contract: &str,
        operator: &str,
        approved: bool,
    ) -> SdkResult<TransactionReceipt> {
        self.call(
            "erc721/set-approval-for-all",
            json!({ "contract": contract, "operator": operator, "approved": approved }),
        )
        .await
    }
}
