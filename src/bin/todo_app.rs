#[tokio::main]
async fn main() {
    crud_showcase::run_todo().await;
}
