#[tokio::main]
async fn main() {
    pbls_lsp::run().await;
}
