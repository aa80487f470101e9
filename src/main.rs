#[actix_web::main]
async fn main() -> std::io::Result<()> {
    admit_card_server::run().await
}
