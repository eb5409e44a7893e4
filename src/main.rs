//! Coil warehouse service entry point
//!
//! Opens the database, starts the HTTP server, and runs until ctrl-c.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use coil_warehouse::server::CoilServer;
use coil_warehouse::storage::Database;

/// Database file name
const DATABASE_FILENAME: &str = "coils.db";

/// Config directory: `COIL_CONFIG_DIR` or the platform data directory
fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COIL_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coil-warehouse")
}

#[tokio::main]
async fn main() {
    let config_dir = config_dir();
    if let Err(e) = std::fs::create_dir_all(&config_dir) {
        eprintln!(
            "[coil-warehouse] Failed to create data directory {}: {}",
            config_dir.display(),
            e
        );
        std::process::exit(1);
    }

    let db_path = std::env::var("COIL_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| config_dir.join(DATABASE_FILENAME));

    let db = match Database::new(&db_path) {
        Ok(db) => Arc::new(Mutex::new(db)),
        Err(e) => {
            eprintln!(
                "[coil-warehouse] Failed to open database {}: {}",
                db_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    let server = CoilServer::new(config_dir, db);
    let handle = match server.start(None).await {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("[coil-warehouse] {}", e);
            std::process::exit(1);
        }
    };
    eprintln!("[coil-warehouse] Listening on 127.0.0.1:{}", handle.port());

    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!(
            "[coil-warehouse] Failed to listen for shutdown signal: {}",
            e
        );
    }
    handle.shutdown();
}
