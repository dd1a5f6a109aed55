use std::sync::Arc;

use futures::FutureExt;
use relay_web::{handler_fn, BoxError, Handler, Next, Request, Response, ResponseError, Router, Server};
use serde::Serialize;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Serialize, Debug)]
pub struct User {
    name: String,
    zip: String,
}

/// Logs every request and the status it ended with.
struct AccessLog;

#[async_trait::async_trait]
impl Handler for AccessLog {
    async fn call(&self, req: &Request, res: &mut Response, next: Next<'_>) -> Result<(), BoxError> {
        res.set_header("X-Powered-By", "relay");
        next.run(req, res).await?;
        info!(method = %req.method(), path = req.path(), status = res.status().as_u16(), "access");
        Ok(())
    }
}

// curl -v -H "Authorization: secret" http://127.0.0.1:8080/user
async fn check_token(req: &Request, res: &mut Response, next: Next<'_>) -> Result<(), BoxError> {
    match req.header("Authorization") {
        Some("secret") => next.run(req, res).await,
        _ => Err(ResponseError::unauthorized("missing or wrong token").into()),
    }
}

async fn get_user(_req: &Request, res: &mut Response, _next: Next<'_>) -> Result<(), BoxError> {
    let user = User { name: "hello".to_string(), zip: "world".to_string() };
    res.set_json_body(&user)?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router = Router::builder()
        .use_global(AccessLog)
        .use_path("/user", handler_fn(|req, res, next| check_token(req, res, next).boxed()))
        .get(
            "/",
            handler_fn(|req, res, next| {
                async move {
                    res.set_text_body(format!("receive from method: {}\r\n", req.method()));
                    next.run(req, res).await
                }
                .boxed()
            }),
        )
        // appended to the chain of `GET /`, runs after the handler above
        .get(
            "/",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_header("X-Chain", "2");
                    Ok(())
                }
                .boxed()
            }),
        )
        .get("/user", handler_fn(|req, res, next| get_user(req, res, next).boxed()))
        .post(
            "/user",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_status(http::StatusCode::CREATED).set_text_body("created");
                    Ok(())
                }
                .boxed()
            }),
        )
        .build();

    let server = Arc::new(Server::builder().router(router).build().unwrap());

    let closer = Arc::clone(&server);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, closing server");
            closer.close();
        }
    });

    if let Err(e) = server.listen(8080).await {
        error!(cause = %e, "server stopped");
    }
}
