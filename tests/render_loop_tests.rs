use anyhow::Result;
use maplayer::prelude::*;

/// Integration tests driving whole frames through a map, the way a host
/// event loop would during animations and user interaction
#[cfg(test)]
mod render_loop_tests {
    use super::*;

    fn init_logging() {
        #[cfg(feature = "debug")]
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn map() -> Map {
        init_logging();
        Map::new(MapConfig::default().with_size(200, 100).with_view(ViewOptions {
            center: Point::new(0.0, 0.0),
            resolution: 10.0,
            ..Default::default()
        }))
    }

    fn wms_layer(id: &str, animating: bool, interacting: bool) -> Result<ImageLayer> {
        let source: Arc<dyn ImageSource> = Arc::new(
            WmsImageSource::new("https://example.com/wms", id)?.with_ratio(1.0),
        );
        Ok(ImageLayer::new(
            ImageLayerOptions::default()
                .with_layer_options(LayerOptions::default().with_id(id))
                .with_source(source)
                .with_update_while_animating(animating)
                .with_update_while_interacting(interacting),
        ))
    }

    fn image_commands(context: &RenderContext) -> Vec<(String, ImageRequest, bool)> {
        context
            .get_drawing_queue()
            .iter()
            .map(|command| match command {
                DrawCommand::Image {
                    layer_id,
                    request,
                    reused,
                    ..
                } => (layer_id.clone(), request.clone(), *reused),
            })
            .collect()
    }

    #[test]
    fn test_idle_frames_request_current_extent() -> Result<()> {
        let mut map = map();
        map.add_layer(wms_layer("roads", false, false)?)?;

        let commands = image_commands(map.render_frame()?);
        assert_eq!(commands.len(), 1);
        let (_, request, reused) = &commands[0];
        assert!(!reused);
        assert_eq!(request.extent, Extent::new(-1000.0, -500.0, 1000.0, 500.0));
        assert_eq!(request.size, Size::new(200, 100));
        assert!(request.url.contains("LAYERS=roads"));
        Ok(())
    }

    #[test]
    fn test_animation_freezes_only_layers_that_did_not_opt_in() -> Result<()> {
        let mut map = map();
        map.add_layer(wms_layer("frozen", false, false)?)?;
        map.add_layer(wms_layer("live", true, false)?)?;
        let before = image_commands(map.render_frame()?);

        map.set_view_hint(ViewHint::Animating, 1);
        map.view_mut().set_center(Point::new(500.0, 0.0));
        let during = image_commands(map.render_frame()?);

        let (_, frozen_request, frozen_reused) = &during[0];
        assert!(frozen_reused);
        assert_eq!(frozen_request, &before[0].1);

        let (_, live_request, live_reused) = &during[1];
        assert!(!live_reused);
        assert_eq!(live_request.extent, Extent::new(-500.0, -500.0, 1500.0, 500.0));

        map.set_view_hint(ViewHint::Animating, -1);
        let after = image_commands(map.render_frame()?);
        assert!(after.iter().all(|(_, _, reused)| !reused));
        assert_eq!(after[0].1.extent, Extent::new(-500.0, -500.0, 1500.0, 500.0));
        Ok(())
    }

    #[test]
    fn test_interaction_uses_its_own_flag() -> Result<()> {
        let mut map = map();
        map.add_layer(wms_layer("animating_only", true, false)?)?;
        map.add_layer(wms_layer("interacting_only", false, true)?)?;
        map.render_frame()?;

        map.set_view_hint(ViewHint::Interacting, 1);
        map.view_mut().set_resolution(20.0);
        let during: Vec<_> = image_commands(map.render_frame()?)
            .into_iter()
            .map(|(id, _, reused)| (id, reused))
            .collect();

        assert_eq!(
            during,
            vec![
                ("animating_only".to_string(), true),
                ("interacting_only".to_string(), false),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_resolution_gating_and_overlay_order() -> Result<()> {
        let mut map = map();
        let mut detail = wms_layer("detail", false, false)?;
        detail.set_max_resolution(5.0);
        map.add_overlay(wms_layer("labels", false, false)?)?;
        map.add_layer(detail)?;
        map.add_layer(wms_layer("base", false, false)?)?;

        let ids: Vec<_> = image_commands(map.render_frame()?)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();
        assert_eq!(ids, vec!["base", "labels"]);

        map.view_mut().set_resolution(2.0);
        let ids: Vec<_> = image_commands(map.render_frame()?)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();
        assert_eq!(ids, vec!["detail", "base", "labels"]);
        Ok(())
    }

    #[derive(Debug)]
    struct EmptyExtentSource;

    impl ImageSource for EmptyExtentSource {
        fn image_request(
            &self,
            _extent: &Extent,
            resolution: f64,
            pixel_ratio: f64,
        ) -> Option<ImageRequest> {
            Some(ImageRequest {
                url: "https://example.com/broken.png".to_string(),
                extent: Extent::empty(),
                resolution,
                pixel_ratio,
                size: Size::new(1, 1),
            })
        }
    }

    #[test]
    fn test_broken_source_does_not_abort_frame() -> Result<()> {
        let mut map = map();
        let broken: Arc<dyn ImageSource> = Arc::new(EmptyExtentSource);
        map.add_layer(ImageLayer::new(
            ImageLayerOptions::default()
                .with_layer_options(LayerOptions::default().with_id("broken"))
                .with_source(broken),
        ))?;
        map.add_layer(wms_layer("good", false, false)?)?;

        let ids: Vec<_> = image_commands(map.render_frame()?)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();
        assert_eq!(ids, vec!["good"]);

        map.set_view_hint(ViewHint::Animating, 1);
        let commands = image_commands(map.render_frame()?);
        assert_eq!(commands.len(), 1);
        assert!(commands[0].2);
        assert!(map.renderer().image_renderer("good").is_some());
        Ok(())
    }

    #[test]
    fn test_map_from_json_config() -> Result<()> {
        let config = MapConfig::from_json(
            r#"{ "size": { "width": 10, "height": 10 }, "pixel_ratio": 2.0,
                 "view": { "center": { "x": 5.0, "y": 5.0 }, "resolution": 1.0 } }"#,
        )?;
        let mut map = Map::new(config);
        map.add_layer(ImageLayer::new(ImageLayerOptions::default().with_source(Arc::new(
            StaticImageSource::new("https://example.com/plan.png", Extent::new(0.0, 0.0, 10.0, 10.0)),
        ))))?;

        let commands = image_commands(map.render_frame()?);
        assert_eq!(commands[0].1.size, Size::new(20, 20));
        Ok(())
    }
}
