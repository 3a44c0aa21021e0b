use compliance_core::config::OpenAiSettings;
use compliance_core::traits::Embedder;
use compliance_embed::{get_default_embedder, FakeEmbedder, OpenAiEmbedder};

fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

#[tokio::test]
async fn fake_embedder_shapes_and_determinism() {
    // Force fake embedder to avoid any network access
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");

    let embedder = get_default_embedder(&OpenAiSettings { embedding_dim: 256, ..OpenAiSettings::default() }).expect("embedder");
    let texts = vec!["PF wage ceiling".to_string(), "PF wage ceiling".to_string()];
    let embs = embedder.embed_batch(&texts).await.expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 256);
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
    assert!(embedder.embedder_id().starts_with("fake:"));
}

#[tokio::test]
async fn shared_words_score_higher() {
    let e = FakeEmbedder::new(512);
    let q = e.embed_query("gratuity after five years").await.expect("query");
    let near = e.embed_text("Gratuity is payable after five years of service");
    let far = e.embed_text("ESI employer contribution rate");
    assert!(cosine(&q, &near) > cosine(&q, &far));
}

#[test]
fn remote_embedder_requires_api_key() {
    std::env::remove_var("OPENAI_API_KEY");
    let settings = OpenAiSettings { api_key: String::new(), ..OpenAiSettings::default() };
    assert!(OpenAiEmbedder::new(&settings).is_err());

    let settings = OpenAiSettings { api_key: "sk-test".into(), ..OpenAiSettings::default() };
    let embedder = OpenAiEmbedder::new(&settings).expect("embedder");
    assert_eq!(embedder.dim(), 1536);
    assert_eq!(embedder.embedder_id(), "openai:text-embedding-ada-002:d1536");
}
