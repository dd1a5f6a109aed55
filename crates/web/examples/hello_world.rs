use futures::FutureExt;
use relay_web::{handler_fn, Router, Server};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router = Router::builder()
        .get(
            "/",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_text_body("hello world");
                    Ok(())
                }
                .boxed()
            }),
        )
        .build();

    let server = Server::builder().router(router).build().unwrap();
    if let Err(e) = server.listen(3000).await {
        error!(cause = %e, "server stopped");
    }
}
