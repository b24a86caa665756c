use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{error, info};

use stowage_bucket::{BucketError, BucketResult};

use crate::config::GatewayConfig;
use crate::gateway;
use crate::store::ObjectStore;

static REGISTRY: OnceLock<ProcessRegistry> = OnceLock::new();

/// Lifecycle state of the gateway listener.
enum GatewayState {
    Stopped,
    Running(SocketAddr),
}

/// Process-wide registry owning the shared object store and the at-most-once
/// gateway launch.
///
/// There is exactly one registry per process, created on first access and
/// alive until process exit. Every bucket handle operates against its store;
/// the gateway serves the same store on its own thread. There is no shutdown
/// path: stopping the listener is solely a process-exit concern.
pub struct ProcessRegistry {
    store: Arc<ObjectStore>,
    gateway: Mutex<GatewayState>,
}

impl ProcessRegistry {
    /// Fetch the singleton, initializing it on the first call. Safe under
    /// concurrent first-time access: exactly one initialization runs.
    pub fn global() -> &'static ProcessRegistry {
        REGISTRY.get_or_init(|| ProcessRegistry {
            store: Arc::new(ObjectStore::new()),
            gateway: Mutex::new(GatewayState::Stopped),
        })
    }

    /// The store shared by all handles and the gateway.
    pub fn store(&self) -> Arc<ObjectStore> {
        Arc::clone(&self.store)
    }

    /// Launch the gateway listener at most once per process and return the
    /// address it is bound to.
    ///
    /// The state mutex is held across the whole bind-and-spawn sequence, so
    /// a racing caller can never observe "stopped" while another caller is
    /// mid-launch. A bind failure is returned to the caller and leaves the
    /// state stopped. Once running, the configuration of later calls is
    /// ignored: the first successful launch wins.
    pub fn ensure_gateway_started(&self, config: &GatewayConfig) -> BucketResult<SocketAddr> {
        let mut state = self.gateway.lock().expect("gateway state lock poisoned");
        if let GatewayState::Running(addr) = *state {
            return Ok(addr);
        }

        let listener =
            TcpListener::bind(("0.0.0.0", config.port)).map_err(BucketError::GatewayStart)?;
        listener
            .set_nonblocking(true)
            .map_err(BucketError::GatewayStart)?;
        let addr = listener.local_addr().map_err(BucketError::GatewayStart)?;

        let store = Arc::clone(&self.store);
        std::thread::Builder::new()
            .name("stowage-gateway".to_string())
            .spawn(move || serve_forever(listener, store))
            .map_err(BucketError::GatewayStart)?;

        *state = GatewayState::Running(addr);
        info!(%addr, "object gateway listening");
        Ok(addr)
    }

    /// Address the gateway is bound to, if it has been started.
    pub fn gateway_addr(&self) -> Option<SocketAddr> {
        match *self.gateway.lock().expect("gateway state lock poisoned") {
            GatewayState::Stopped => None,
            GatewayState::Running(addr) => Some(addr),
        }
    }
}

/// Run the gateway on a dedicated single-threaded runtime.
///
/// The listener must outlive whichever caller runtime happened to open the
/// first bucket, so it gets its own thread for the remaining lifetime of the
/// process.
fn serve_forever(listener: TcpListener, store: Arc<ObjectStore>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "gateway runtime failed to start");
            return;
        }
    };

    runtime.block_on(async move {
        let listener = match tokio::net::TcpListener::from_std(listener) {
            Ok(listener) => listener,
            Err(err) => {
                error!(error = %err, "gateway listener registration failed");
                return;
            }
        };
        if let Err(err) = axum::serve(listener, gateway::router(store)).await {
            error!(error = %err, "gateway terminated");
        }
    });
}
