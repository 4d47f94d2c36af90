use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, web};

/// Serves `tests/static/` plus a few status-code routes on a random port
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route(
                "/not-found",
                web::get().to(|| async { HttpResponse::NotFound().body("Not Found") }),
            )
            .route(
                "/server-error",
                web::get().to(|| async { HttpResponse::InternalServerError().body("Error") }),
            )
            .route(
                "/plain.txt",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("text/plain")
                        .body("just some plain words")
                }),
            )
            .service(Files::new("/", "tests/static/").index_file("index.html"))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}
