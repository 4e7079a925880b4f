#[tokio::main]
async fn main() {
    crud_showcase::run_blog().await;
}
