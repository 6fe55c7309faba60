// src/main.rs
//
// Desktop entry point: wires storage, the SDK bridge and services, then
// hands them to Tauri.

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::sync::Arc;

use anyhow::Context;
use tauri::Emitter;
use tracing_subscriber::EnvFilter;

use magicminter::application::commands::*;
use magicminter::application::notifications::{
    register_notification_handlers, Notification, NOTIFICATION_EVENT,
};
use magicminter::application::state::AppState;
use magicminter::config::AppConfig;
use magicminter::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};
use magicminter::integrations::{ContractSdk, HttpSdkGateway, WalletProvider};
use magicminter::repositories::{KeyValueRepository, SqliteKeyValueRepository};

fn main() -> anyhow::Result<()> {
    // 0. LOGGING (RUST_LOG, default info; `log` records are bridged)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. CONFIG
    let config = AppConfig::load().context("loading configuration")?;

    // 2. STORAGE
    let pool = Arc::new(create_connection_pool().context("opening the asset store")?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn).context("initializing the asset store")?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;
        log::info!(
            "Asset store: {} keys, {} bytes",
            stats.key_count,
            stats.size_bytes
        );
    }
    let store: Arc<dyn KeyValueRepository> = Arc::new(SqliteKeyValueRepository::new(pool));

    // 3. WALLET / SDK BRIDGE
    let gateway = Arc::new(HttpSdkGateway::new(&config.sdk)?);
    let wallet: Arc<dyn WalletProvider> = gateway.clone();
    let sdk: Arc<dyn ContractSdk> = gateway;

    // 4. SERVICES
    let app_state = AppState::build(config, store, wallet, sdk)?;
    let event_bus = app_state.event_bus.clone();

    // 5. TAURI BOOTSTRAP
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(app_state)
        .setup(move |app| {
            let handle = app.handle().clone();
            register_notification_handlers(
                &event_bus,
                Arc::new(move |notification: Notification| {
                    if let Err(e) = handle.emit(NOTIFICATION_EVENT, &notification) {
                        log::warn!("Failed to forward notification: {}", e);
                    }
                }),
            );
            log::info!("MagicMinter ready");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            list_tokens,
            list_nfts,
            get_token_page,
            get_nft_page,
            list_favorite_tokens,
            list_favorite_nfts,
            toggle_token_favorite,
            toggle_nft_favorite,
            get_preferences,
            set_view_mode,
            set_sort_option,
            list_sort_options,
            get_fee_quote,
            pay_fee,
            deploy_token,
            deploy_nft_collection,
            is_deploying,
            get_operation_status,
            mint_tokens,
            burn_tokens,
            mint_nft,
            burn_nft,
            get_nft_metadata,
            send_asset,
            get_receive_info,
            get_profile,
            get_dashboard,
            get_asset_links,
            open_link,
        ])
        .run(tauri::generate_context!())
        .context("running the desktop shell")?;

    Ok(())
}
