//! Headless GPU rendering tests. Each test is skipped when no adapter is available.

use phosphor_scope::gpu::{HeadlessRenderer, RenderConfig};
use phosphor_scope::TRACE_LEN;

async fn create_renderer(traces_per_frame: usize) -> Option<HeadlessRenderer> {
    let config = RenderConfig {
        width: 320,
        height: 180,
        traces_per_frame,
        ..Default::default()
    };
    match HeadlessRenderer::new(config).await {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            eprintln!("Skipping GPU test: {}", e);
            None
        }
    }
}

#[tokio::test]
async fn test_shader_compiles_without_diagnostics() {
    if let Some(renderer) = create_renderer(1).await {
        assert!(
            renderer.diagnostics().is_empty(),
            "Unexpected shader diagnostics: {:?}",
            renderer.diagnostics()
        );
    }
}

#[tokio::test]
async fn test_empty_frame_is_background() {
    if let Some(renderer) = create_renderer(4).await {
        let pixels = renderer.render_frame(&[]).unwrap();
        assert_eq!(pixels.len(), 320 * 180 * 4);
        assert!(pixels.chunks(4).all(|p| p[0] == 0 && p[1] == 0 && p[2] == 0));
    }
}

#[tokio::test]
async fn test_flat_trace_draws_opaque_yellow() {
    if let Some(renderer) = create_renderer(4).await {
        // Zero path length saturates alpha
        let flat = vec![0.2f32; TRACE_LEN];
        let pixels = renderer.render_frame(&[flat.as_slice()]).unwrap();

        let yellow = pixels
            .chunks(4)
            .filter(|p| p[0] > 200 && p[1] > 200)
            .count();
        assert!(yellow > 100, "Expected a lit line, found {} yellow pixels", yellow);
        assert!(pixels.chunks(4).all(|p| p[2] == 0), "Traces must not contain blue");
    }
}

#[tokio::test]
async fn test_fast_trace_is_dimmer_than_flat_trace() {
    if let Some(renderer) = create_renderer(4).await {
        let flat = vec![0.0f32; TRACE_LEN];
        let zigzag: Vec<f32> = (0..TRACE_LEN)
            .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();

        let brightness = |pixels: &[u8]| pixels.chunks(4).map(|p| p[0] as u64).sum::<u64>();

        let flat_pixels = renderer.render_frame(&[flat.as_slice()]).unwrap();
        let zigzag_pixels = renderer.render_frame(&[zigzag.as_slice()]).unwrap();

        // Zigzag covers far more pixels, yet each is nearly transparent
        let flat_peak = flat_pixels.chunks(4).map(|p| p[0]).max().unwrap();
        let zigzag_peak = zigzag_pixels.chunks(4).map(|p| p[0]).max().unwrap();
        assert!(flat_peak > zigzag_peak);
        assert!(brightness(&flat_pixels) > 0);
    }
}
