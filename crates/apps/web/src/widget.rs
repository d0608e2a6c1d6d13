use foundation::bounds::Bounds;
use foundation::padding::Padding;
use layers::style::StyleDocument;
use layers::toggle::LayerVisibilityTarget;
use layers::visibility::Visibility;

/// What the dashboard needs from the map widget.
///
/// Reads return `None` while the map has not finished loading.
pub trait MapWidget {
    /// Visible `[[west, south], [east, north]]`, as reported by the map.
    fn get_bounds(&self) -> Option<[[f64; 2]; 2]>;
    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding);
    fn get_style(&self) -> Option<StyleDocument>;
    fn set_layout_property(&mut self, layer_id: &str, name: &str, value: &str);
    fn zoom_in(&mut self);
    fn zoom_out(&mut self);
}

/// Lets the group toggler drive any [`MapWidget`].
pub struct WidgetLayers<'a, W: MapWidget + ?Sized>(pub &'a mut W);

impl<W: MapWidget + ?Sized> LayerVisibilityTarget for WidgetLayers<'_, W> {
    fn set_layer_visibility(&mut self, layer_id: &str, visibility: Visibility) {
        self.0
            .set_layout_property(layer_id, "visibility", visibility.as_str());
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory widget recording every call made on it.
    #[derive(Debug, Default)]
    pub struct FakeWidget {
        pub bounds: Option<Bounds>,
        /// Reported instead of `bounds` when set.
        pub raw_bounds: Option<[[f64; 2]; 2]>,
        pub style: Option<StyleDocument>,
        pub fits: Vec<(Bounds, Padding)>,
        pub layout_calls: Vec<(String, String, String)>,
        pub zoom: i32,
    }

    impl FakeWidget {
        pub fn with_style(style: StyleDocument) -> Self {
            Self {
                style: Some(style),
                ..Self::default()
            }
        }

        pub fn visibility_of(&self, layer_id: &str) -> Option<&str> {
            self.layout_calls
                .iter()
                .rev()
                .find(|(id, name, _)| id == layer_id && name == "visibility")
                .map(|(_, _, value)| value.as_str())
        }
    }

    impl MapWidget for FakeWidget {
        fn get_bounds(&self) -> Option<[[f64; 2]; 2]> {
            self.raw_bounds.or(self.bounds.map(Bounds::to_pairs))
        }

        fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
            self.bounds = Some(bounds);
            self.fits.push((bounds, padding));
        }

        fn get_style(&self) -> Option<StyleDocument> {
            self.style.clone()
        }

        fn set_layout_property(&mut self, layer_id: &str, name: &str, value: &str) {
            self.layout_calls
                .push((layer_id.to_string(), name.to_string(), value.to_string()));
            if name == "visibility" {
                if let (Some(style), Some(v)) = (self.style.as_mut(), visibility(value)) {
                    style.set_layer_visibility(layer_id, v);
                }
            }
        }

        fn zoom_in(&mut self) {
            self.zoom += 1;
        }

        fn zoom_out(&mut self) {
            self.zoom -= 1;
        }
    }

    fn visibility(value: &str) -> Option<Visibility> {
        match value {
            "visible" => Some(Visibility::Visible),
            "none" => Some(Visibility::None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeWidget;
    use super::*;
    use layers::style::StyleLayer;
    use layers::toggle::toggle_group_layers;

    #[test]
    fn toggling_through_widget_sets_layout_visibility() {
        let style = StyleDocument::default()
            .with_group("a", "basemap-light")
            .with_group("b", "basemap-dark")
            .with_layer(StyleLayer::new("land").in_group("a"))
            .with_layer(StyleLayer::new("land-dark").in_group("b"))
            .with_layer(StyleLayer::new("rivers"));
        let mut widget = FakeWidget::with_style(style.clone());

        toggle_group_layers(&style, &mut WidgetLayers(&mut widget), "basemap-", |g| {
            g == "basemap-dark"
        });

        assert_eq!(widget.visibility_of("land"), Some("none"));
        assert_eq!(widget.visibility_of("land-dark"), Some("visible"));
        assert_eq!(widget.visibility_of("rivers"), None);
    }
}
