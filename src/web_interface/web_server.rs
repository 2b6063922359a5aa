use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use warp::Filter;

use crate::error_handling::types::WebError;
use crate::session_management::SessionController;

use super::routes;

/// Web server for the operator dashboard and JSON API
pub struct WebServer {
    controller: Arc<SessionController>,
}

impl WebServer {
    /// Create a new WebServer instance
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self { controller }
    }

    /// Start the web server on the given port
    pub async fn start(&self, port: u16) -> Result<(), WebError> {
        let routes = routes::dashboard_route()
            .or(routes::asset_route())
            .or(routes::status_route(self.controller.clone()))
            .or(routes::metrics_route(self.controller.clone()))
            .or(routes::logs_route(self.controller.clone()))
            .or(routes::configure_route(self.controller.clone()))
            .or(routes::stop_route(self.controller.clone()));

        let addr: SocketAddr = ([0, 0, 0, 0], port).into();
        info!("dashboard listening on http://{}", addr);
        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
