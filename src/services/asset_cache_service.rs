// src/services/asset_cache_service.rs
//
// In-process view of the deployed-asset cache.
//
// State is loaded once from the repository and every mutation is written
// back before it becomes visible. Read-modify-write happens under one write
// lock, so concurrent commands cannot lose each other's updates.

use std::sync::{Arc, RwLock};

use crate::domain::{
    paginate, sort_assets, validate_nft_collection, validate_token, AssetKind, DeployedAsset,
    DomainError, NftCollection, Page, SortOption, Token, ViewMode,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoriteToggled};
use crate::repositories::AssetRepository;

#[derive(Debug, Default)]
struct CacheState {
    tokens: Vec<Token>,
    nfts: Vec<NftCollection>,
    view_mode: ViewMode,
    sort_option: SortOption,
}

/// Copy of `records` with `record` appended, rejecting a known address
fn with_appended<T: DeployedAsset + Clone>(records: &[T], mut record: T) -> AppResult<Vec<T>> {
    if records
        .iter()
        .any(|r| same_address(r.address(), record.address()))
    {
        return Err(DomainError::DuplicateAddress(record.address().to_string()).into());
    }

    record.set_favorite(false);
    let mut updated = records.to_vec();
    updated.push(record);
    Ok(updated)
}

/// Addresses compare case-insensitively everywhere in the cache
fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b.trim())
}

/// Copy of `records` with the favorite flag of `address` flipped.
/// Returns the stored address alongside the new flag.
fn with_toggled<T: DeployedAsset + Clone>(
    records: &[T],
    address: &str,
) -> AppResult<(Vec<T>, String, bool)> {
    let mut updated = records.to_vec();
    let record = updated
        .iter_mut()
        .find(|r| same_address(r.address(), address))
        .ok_or(AppError::NotFound)?;

    let favorite = !record.is_favorite();
    record.set_favorite(favorite);
    let stored = record.address().to_string();
    Ok((updated, stored, favorite))
}

fn favorites_of<T: DeployedAsset + Clone>(records: &[T], option: SortOption) -> Vec<T> {
    let favorites: Vec<T> = records.iter().filter(|r| r.is_favorite()).cloned().collect();
    sort_assets(&favorites, option)
}

pub struct AssetCacheService {
    repo: Arc<dyn AssetRepository>,
    state: RwLock<CacheState>,
    page_size: usize,
    event_bus: Arc<EventBus>,
}

impl AssetCacheService {
    /// Build the service and load the persisted cache
    pub fn new(
        repo: Arc<dyn AssetRepository>,
        event_bus: Arc<EventBus>,
        page_size: usize,
    ) -> AppResult<Self> {
        let service = Self {
            repo,
            state: RwLock::new(CacheState::default()),
            page_size,
            event_bus,
        };
        service.reload()?;
        Ok(service)
    }

    /// Re-read every key from the repository
    pub fn reload(&self) -> AppResult<()> {
        let loaded = CacheState {
            tokens: self.repo.load_tokens()?,
            nfts: self.repo.load_nfts()?,
            view_mode: self.repo.load_view_mode()?,
            sort_option: self.repo.load_sort_option()?,
        };

        log::info!(
            "Asset cache loaded: {} tokens, {} NFT collections",
            loaded.tokens.len(),
            loaded.nfts.len()
        );

        *self.state.write()? = loaded;
        Ok(())
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    pub fn add_token(&self, token: Token) -> AppResult<Token> {
        validate_token(&token)?;

        let mut state = self.state.write()?;
        let tokens = with_appended(&state.tokens, token)?;
        self.repo.save_tokens(&tokens)?;
        state.tokens = tokens;

        let added = state.tokens.last().cloned().ok_or(AppError::NotFound)?;
        log::info!("Recorded token {} at {}", added.symbol, added.address);
        Ok(added)
    }

    pub fn add_nft(&self, nft: NftCollection) -> AppResult<NftCollection> {
        validate_nft_collection(&nft)?;

        let mut state = self.state.write()?;
        let nfts = with_appended(&state.nfts, nft)?;
        self.repo.save_nfts(&nfts)?;
        state.nfts = nfts;

        let added = state.nfts.last().cloned().ok_or(AppError::NotFound)?;
        log::info!("Recorded NFT collection {} at {}", added.symbol, added.address);
        Ok(added)
    }

    /// Flip a token's favorite flag; returns the new value
    pub fn toggle_token_favorite(&self, address: &str) -> AppResult<bool> {
        let (stored, favorite) = {
            let mut state = self.state.write()?;
            let (tokens, stored, favorite) = with_toggled(&state.tokens, address)?;
            self.repo.save_tokens_with_favorites(&tokens)?;
            state.tokens = tokens;
            (stored, favorite)
        };

        self.event_bus
            .emit(FavoriteToggled::new(AssetKind::Token, stored, favorite));
        Ok(favorite)
    }

    /// Flip a collection's favorite flag; returns the new value
    pub fn toggle_nft_favorite(&self, address: &str) -> AppResult<bool> {
        let (stored, favorite) = {
            let mut state = self.state.write()?;
            let (nfts, stored, favorite) = with_toggled(&state.nfts, address)?;
            self.repo.save_nfts_with_favorites(&nfts)?;
            state.nfts = nfts;
            (stored, favorite)
        };

        self.event_bus
            .emit(FavoriteToggled::new(AssetKind::NftCollection, stored, favorite));
        Ok(favorite)
    }

    pub fn set_view_mode(&self, mode: ViewMode) -> AppResult<()> {
        let mut state = self.state.write()?;
        self.repo.save_view_mode(mode)?;
        state.view_mode = mode;
        Ok(())
    }

    pub fn set_sort_option(&self, option: SortOption) -> AppResult<()> {
        let mut state = self.state.write()?;
        self.repo.save_sort_option(option)?;
        state.sort_option = option;
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn view_mode(&self) -> AppResult<ViewMode> {
        Ok(self.state.read()?.view_mode)
    }

    pub fn sort_option(&self) -> AppResult<SortOption> {
        Ok(self.state.read()?.sort_option)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Tokens under the current sort option
    pub fn tokens(&self) -> AppResult<Vec<Token>> {
        let state = self.state.read()?;
        Ok(sort_assets(&state.tokens, state.sort_option))
    }

    pub fn nfts(&self) -> AppResult<Vec<NftCollection>> {
        let state = self.state.read()?;
        Ok(sort_assets(&state.nfts, state.sort_option))
    }

    pub fn tokens_sorted_by(&self, option: SortOption) -> AppResult<Vec<Token>> {
        Ok(sort_assets(&self.state.read()?.tokens, option))
    }

    pub fn nfts_sorted_by(&self, option: SortOption) -> AppResult<Vec<NftCollection>> {
        Ok(sort_assets(&self.state.read()?.nfts, option))
    }

    pub fn token_page(&self, page: usize) -> AppResult<Page<Token>> {
        Ok(paginate(&self.tokens()?, page, self.page_size)?)
    }

    pub fn nft_page(&self, page: usize) -> AppResult<Page<NftCollection>> {
        Ok(paginate(&self.nfts()?, page, self.page_size)?)
    }

    pub fn favorite_tokens(&self) -> AppResult<Vec<Token>> {
        let state = self.state.read()?;
        Ok(favorites_of(&state.tokens, state.sort_option))
    }

    pub fn favorite_nfts(&self) -> AppResult<Vec<NftCollection>> {
        let state = self.state.read()?;
        Ok(favorites_of(&state.nfts, state.sort_option))
    }

    pub fn find_token(&self, address: &str) -> AppResult<Option<Token>> {
        Ok(self
            .state
            .read()?
            .tokens
            .iter()
            .find(|t| same_address(&t.address, address))
            .cloned())
    }

    pub fn find_nft(&self, address: &str) -> AppResult<Option<NftCollection>> {
        Ok(self
            .state
            .read()?
            .nfts
            .iter()
            .find(|n| same_address(&n.address, address))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryKeyValueRepository, KeyValueRepository, KvAssetRepository};
    use chrono::{Duration, Utc};

    fn setup() -> (Arc<InMemoryKeyValueRepository>, AssetCacheService) {
        let store = Arc::new(InMemoryKeyValueRepository::new());
        let service = open(store.clone());
        (store, service)
    }

    fn open(store: Arc<InMemoryKeyValueRepository>) -> AssetCacheService {
        let repo = Arc::new(KvAssetRepository::new(store));
        AssetCacheService::new(repo, Arc::new(EventBus::new()), 6).unwrap()
    }

    fn token(address: &str, name: &str, minutes_ago: i64) -> Token {
        let mut token = Token::new(
            address.to_string(),
            name.to_string(),
            name.to_uppercase(),
            "1000".to_string(),
        );
        token.timestamp = Utc::now() - Duration::minutes(minutes_ago);
        token
    }

    fn nft(address: &str, name: &str) -> NftCollection {
        NftCollection::new(
            address.to_string(),
            name.to_string(),
            "WIZ".to_string(),
            "https://example.com/wiz.png".to_string(),
        )
    }

    #[test]
    fn test_add_persists_immediately() {
        let (store, service) = setup();
        let mut t = token("0x01", "Alpha", 0);
        t.is_favorite = true;

        let added = service.add_token(t).unwrap();
        assert!(!added.is_favorite);

        let raw = store.get("deployedTokens").unwrap().unwrap();
        assert!(raw.contains("\"address\":\"0x01\""));

        let reopened = open(store);
        assert_eq!(reopened.tokens().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_stored_record_does_not_erase_history() {
        let store = Arc::new(InMemoryKeyValueRepository::new());
        let mut bad = serde_json::to_value(token("0x03", "Gamma", 0)).unwrap();
        bad["timestamp"] = serde_json::Value::String("not a date".to_string());
        let raw = serde_json::to_string(&vec![
            serde_json::to_value(token("0x01", "Alpha", 2)).unwrap(),
            serde_json::to_value(token("0x02", "Beta", 1)).unwrap(),
            bad,
        ])
        .unwrap();
        store.set("deployedTokens", &raw).unwrap();

        let service = open(store.clone());
        assert_eq!(service.tokens().unwrap().len(), 2);

        service.add_token(token("0x09", "Omega", 0)).unwrap();

        let reopened = open(store.clone());
        let addresses: Vec<String> = reopened
            .tokens_sorted_by(SortOption::Oldest)
            .unwrap()
            .into_iter()
            .map(|t| t.address)
            .collect();
        assert_eq!(addresses, vec!["0x01", "0x02", "0x09"]);
        assert_eq!(store.get("deployedTokens.unreadable").unwrap(), Some(raw));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let (_, service) = setup();
        service.add_token(token("0xAB", "Alpha", 0)).unwrap();

        let err = service.add_token(token("0xab", "Beta", 0)).unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::DuplicateAddress(_))));
        assert_eq!(service.tokens().unwrap().len(), 1);
    }

    #[test]
    fn test_lookups_ignore_address_case() {
        let (store, service) = setup();
        service.add_token(token("0xAbCd", "Alpha", 0)).unwrap();

        assert!(service.add_token(token("0xabcd", "Beta", 0)).is_err());
        assert_eq!(service.find_token("0xABCD").unwrap().unwrap().address, "0xAbCd");

        assert!(service.toggle_token_favorite("0xabcd").unwrap());
        assert_eq!(store.get("favoriteTokens").unwrap().as_deref(), Some(r#"["0xAbCd"]"#));
        assert_eq!(service.favorite_tokens().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_record_rejected() {
        let (_, service) = setup();
        let mut bad = nft("0x09", "Wizards");
        bad.image_url = "nope".to_string();
        assert!(service.add_nft(bad).is_err());
        assert!(service.nfts().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (_, service) = setup();
        service.add_nft(nft("0x02", "Wizards")).unwrap();

        assert!(service.toggle_nft_favorite("0x02").unwrap());
        assert_eq!(service.favorite_nfts().unwrap().len(), 1);

        assert!(!service.toggle_nft_favorite("0x02").unwrap());
        assert!(service.favorite_nfts().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_unknown_address() {
        let (_, service) = setup();
        assert!(matches!(
            service.toggle_token_favorite("0xmissing"),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_favorites_survive_reload() {
        let (store, service) = setup();
        service.add_token(token("0x01", "Alpha", 2)).unwrap();
        service.add_token(token("0x02", "Beta", 1)).unwrap();
        service.toggle_token_favorite("0x02").unwrap();

        let favorites = store.get("favoriteTokens").unwrap().unwrap();
        assert_eq!(favorites, r#"["0x02"]"#);

        let reopened = open(store);
        let tokens = reopened.tokens_sorted_by(SortOption::Oldest).unwrap();
        assert!(!tokens[0].is_favorite);
        assert!(tokens[1].is_favorite);
    }

    #[test]
    fn test_toggle_emits_event() {
        let store = Arc::new(InMemoryKeyValueRepository::new());
        let bus = Arc::new(EventBus::new());
        let repo = Arc::new(KvAssetRepository::new(store));
        let service = AssetCacheService::new(repo, bus.clone(), 6).unwrap();
        service.add_token(token("0x01", "Alpha", 0)).unwrap();

        service.toggle_token_favorite("0x01").unwrap();

        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "FavoriteToggled");
    }

    #[test]
    fn test_reads_follow_sort_option() {
        let (store, service) = setup();
        service.add_token(token("0x01", "beta", 3)).unwrap();
        service.add_token(token("0x02", "Alpha", 1)).unwrap();
        service.add_token(token("0x03", "gamma", 2)).unwrap();

        let newest: Vec<String> = service.tokens().unwrap().into_iter().map(|t| t.address).collect();
        assert_eq!(newest, vec!["0x02", "0x03", "0x01"]);

        service.set_sort_option(SortOption::Name).unwrap();
        let by_name: Vec<String> = service.tokens().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(by_name, vec!["Alpha", "beta", "gamma"]);

        assert_eq!(store.get("sortOption").unwrap().as_deref(), Some("name"));
        assert_eq!(open(store).sort_option().unwrap(), SortOption::Name);
    }

    #[test]
    fn test_view_mode_persisted() {
        let (store, service) = setup();
        service.set_view_mode(ViewMode::List).unwrap();
        assert_eq!(open(store).view_mode().unwrap(), ViewMode::List);
    }

    #[test]
    fn test_token_page() {
        let (_, service) = setup();
        for i in 0..8 {
            service
                .add_token(token(&format!("0x{:02}", i), "Coin", i))
                .unwrap();
        }

        let first = service.token_page(1).unwrap();
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.total_pages, 2);

        let last = service.token_page(5).unwrap();
        assert_eq!(last.current_page, 2);
        assert_eq!(last.items.len(), 2);
    }

    #[test]
    fn test_find() {
        let (_, service) = setup();
        service.add_nft(nft("0x02", "Wizards")).unwrap();
        assert!(service.find_nft("0x02").unwrap().is_some());
        assert!(service.find_nft("0x03").unwrap().is_none());
        assert!(service.find_token("0x02").unwrap().is_none());
    }
}
