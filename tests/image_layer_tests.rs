use anyhow::Result;
use maplayer::prelude::*;
use std::sync::Mutex;

/// Integration tests for the public image layer API
#[cfg(test)]
mod image_layer_tests {
    use super::*;

    fn wms() -> Result<Arc<dyn ImageSource>> {
        Ok(Arc::new(WmsImageSource::new(
            "https://example.com/geoserver/wms",
            "topp:states",
        )?))
    }

    #[test]
    fn test_defaults_without_options() {
        let layer = ImageLayer::default();
        let explicit = ImageLayer::new(ImageLayerOptions::default());

        for layer in [&layer, &explicit] {
            assert!(!layer.update_while_animating());
            assert!(!layer.update_while_interacting());
            assert_eq!(layer.kind(), LayerKind::Image);
            assert!(layer.source().is_none());
            assert_eq!(layer.opacity(), 1.0);
            assert!(layer.is_visible());
        }
    }

    #[test]
    fn test_flag_combinations() {
        for (animating, interacting) in [(false, false), (false, true), (true, false), (true, true)] {
            let layer = ImageLayer::new(ImageLayerOptions {
                update_while_animating: animating,
                update_while_interacting: interacting,
                ..Default::default()
            });
            assert_eq!(layer.update_while_animating(), animating);
            assert_eq!(layer.update_while_interacting(), interacting);
        }
    }

    #[test]
    fn test_source_only() -> Result<()> {
        let source = wms()?;
        let layer = ImageLayer::new(ImageLayerOptions {
            source: Some(source.clone()),
            ..Default::default()
        });

        assert!(!layer.update_while_animating());
        assert!(!layer.update_while_interacting());
        assert!(Arc::ptr_eq(layer.source().unwrap(), &source));
        Ok(())
    }

    #[test]
    fn test_shared_source_across_layers() -> Result<()> {
        let source = wms()?;
        let mut first = ImageLayer::new(ImageLayerOptions::default().with_source(source.clone()));
        let second = ImageLayer::new(ImageLayerOptions::default().with_source(source.clone()));

        assert!(Arc::ptr_eq(first.source().unwrap(), second.source().unwrap()));

        first.set_source(None);
        assert!(first.source().is_none());
        assert!(Arc::ptr_eq(second.source().unwrap(), &source));
        Ok(())
    }

    #[test]
    fn test_listener_sees_change_synchronously() {
        let mut layer = ImageLayer::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let key = layer.on_change(move |change| {
            seen_clone.lock().unwrap().push((change.property, change.old.clone()));
        });

        layer.set_visible(false);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(LayerProperty::Visible, PropertyValue::Visible(true))]
        );

        assert!(layer.un(key));
        layer.set_visible(true);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_options_from_json_config() -> Result<()> {
        let options = ImageLayerOptions::from_json(
            r#"{
                "id": "states",
                "z_index": 3,
                "min_resolution": 1.0,
                "max_resolution": 5000.0,
                "update_while_animating": true
            }"#,
        )?
        .with_source(wms()?);
        let layer = ImageLayer::new(options);

        assert_eq!(layer.id(), "states");
        assert_eq!(layer.z_index(), Some(3));
        assert!(layer.update_while_animating());
        assert!(!layer.update_while_interacting());

        let state = layer.layer_state();
        assert!(state.visible_at_resolution(1.0));
        assert!(!state.visible_at_resolution(5000.0));
        Ok(())
    }
}
