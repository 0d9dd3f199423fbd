use crate::api::routes;
use crate::certs::CertGate;
use crate::config::SharedConfig;
use crate::fcrdns::DynResolver;
use crate::txt_writer::DynTxtWriter;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub cert_gate: CertGate,
    pub txt_writer: DynTxtWriter,
}

/// Build the API [`Router`].
///
/// `/certs` relies on [`ConnectInfo`][axum::extract::ConnectInfo] for the peer address, so the
/// router must be served with
/// [`into_make_service_with_connect_info`][Router::into_make_service_with_connect_info].
pub fn router(config: SharedConfig, resolver: DynResolver, txt_writer: DynTxtWriter) -> Router {
    let cert_gate = CertGate::new(config.clone(), resolver);
    routes::new(AppState {
        config,
        cert_gate,
        txt_writer,
    })
}

/// Serve the API on [`Config::api_bind_addr`][crate::config::Config::api_bind_addr] until
/// `shutdown` completes.
pub fn new(
    config: SharedConfig,
    resolver: DynResolver,
    txt_writer: DynTxtWriter,
    shutdown: impl Future<Output = ()>,
) -> impl Future<Output = hyper::Result<()>> {
    let bind_addr = config.api_bind_addr;
    axum::Server::bind(&bind_addr)
        .serve(
            router(config, resolver, txt_writer)
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
}
