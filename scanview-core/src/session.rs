use crate::{
    compute_fit, GestureController, GestureEvent, PixelSize, Redraw, ResizePolicy, ViewTransform,
    ViewerConfig, ViewerError,
};

/// One viewer: a surface, the image shown on it (if any) and the controller
/// that owns the transform.
///
/// Every method that changes the transform returns the [`Redraw`] the host
/// must paint. Input is ignored until an image is loaded.
#[derive(Clone, Debug)]
pub struct ViewerSession {
    surface: PixelSize,
    image: Option<PixelSize>,
    controller: GestureController,
}

impl Default for ViewerSession {
    /// Default config on its minimum surface.
    fn default() -> Self {
        Self {
            surface: ViewerConfig::default().min_surface(),
            image: None,
            controller: GestureController::default(),
        }
    }
}

impl ViewerSession {
    /// Fails if `config` does not validate or `surface` is empty.
    pub fn new(config: ViewerConfig, surface: PixelSize) -> Result<Self, ViewerError> {
        if surface.is_empty() {
            return Err(ViewerError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        Ok(Self {
            surface,
            image: None,
            controller: GestureController::new(config, ViewTransform::default())?,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        self.controller.config()
    }

    pub fn surface(&self) -> PixelSize {
        self.surface
    }

    pub fn image(&self) -> Option<PixelSize> {
        self.image
    }

    pub fn transform(&self) -> ViewTransform {
        self.controller.transform()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Show a newly loaded image: drop any drag and fit it to the surface.
    pub fn set_image(&mut self, image: PixelSize) -> Result<Redraw, ViewerError> {
        let fitted = compute_fit(self.surface, image)?;
        self.image = Some(image);
        self.controller.reset_gesture();
        log::info!(
            "Image {}x{} fitted at scale {:.4}",
            image.width,
            image.height,
            fitted.scale
        );
        Ok(self.controller.set_transform(fitted))
    }

    /// Forget the current image. Nothing is left to draw.
    pub fn clear_image(&mut self) {
        self.image = None;
        self.controller.reset_gesture();
    }

    /// Record a new surface size and apply the configured resize policy.
    ///
    /// Returns a redraw when the policy refits a loaded image.
    pub fn set_surface(&mut self, surface: PixelSize) -> Result<Option<Redraw>, ViewerError> {
        if surface.is_empty() {
            return Err(ViewerError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        if surface == self.surface {
            return Ok(None);
        }
        self.surface = surface;

        match (self.config().resize_policy, self.image) {
            (ResizePolicy::Refit, Some(_)) => self.fit().map(Some),
            _ => Ok(None),
        }
    }

    /// Center the image and scale it to fit entirely within the surface.
    pub fn fit(&mut self) -> Result<Redraw, ViewerError> {
        let image = self.image.ok_or(ViewerError::NoImage)?;
        let fitted = compute_fit(self.surface, image)?;
        Ok(self.controller.set_transform(fitted))
    }

    pub fn zoom_in(&mut self) -> Option<Redraw> {
        self.image?;
        Some(self.controller.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Option<Redraw> {
        self.image?;
        Some(self.controller.zoom_out())
    }

    pub fn handle(&mut self, event: GestureEvent) -> Option<Redraw> {
        self.image?;
        self.controller.handle(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SurfacePoint, SCALE_MAX};

    fn session() -> ViewerSession {
        ViewerSession::new(ViewerConfig::default(), PixelSize::new(600, 400)).unwrap()
    }

    #[test]
    fn set_image_fits() {
        let mut s = session();
        let redraw = s.set_image(PixelSize::new(1200, 800)).unwrap();
        assert_eq!(redraw.transform, ViewTransform::centered(0.5));
        assert_eq!(s.image(), Some(PixelSize::new(1200, 800)));
    }

    #[test]
    fn set_image_rejects_empty_image_and_keeps_previous() {
        let mut s = session();
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();

        assert!(s.set_image(PixelSize::new(0, 0)).is_err());
        assert_eq!(s.image(), Some(PixelSize::new(1200, 800)));
    }

    #[test]
    fn new_image_ends_drag() {
        let mut s = session();
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();
        let _ = s.handle(GestureEvent::PointerDown(SurfacePoint::new(5.0, 5.0)));
        assert!(s.is_dragging());

        let _ = s.set_image(PixelSize::new(300, 300)).unwrap();
        assert!(!s.is_dragging());
    }

    #[test]
    fn input_ignored_without_image() {
        let mut s = session();
        assert!(s.zoom_in().is_none());
        assert!(s.zoom_out().is_none());
        assert!(s
            .handle(GestureEvent::Wheel {
                delta_y: -1.0,
                at: SurfacePoint::CENTER
            })
            .is_none());
        assert_eq!(s.fit().unwrap_err(), ViewerError::NoImage);
    }

    #[test]
    fn fit_after_pan_and_zoom_restores_fit() {
        let mut s = session();
        let fitted = s.set_image(PixelSize::new(1200, 800)).unwrap().transform;
        let _ = s.handle(GestureEvent::PointerDown(SurfacePoint::new(0.0, 0.0)));
        let _ = s.handle(GestureEvent::PointerMove(SurfacePoint::new(40.0, 40.0)));
        let _ = s.handle(GestureEvent::PointerUp);
        let _ = s.zoom_in();

        assert_eq!(s.fit().unwrap().transform, fitted);
    }

    #[test]
    fn fit_twice_gives_same_redraw() {
        let mut s = session();
        let _ = s.set_image(PixelSize::new(2480, 3508)).unwrap();
        let _ = s.handle(GestureEvent::PointerDown(SurfacePoint::new(10.0, -20.0)));
        let _ = s.handle(GestureEvent::PointerMove(SurfacePoint::new(95.0, 60.0)));
        let _ = s.handle(GestureEvent::PointerUp);
        let _ = s.handle(GestureEvent::Wheel {
            delta_y: -1.0,
            at: SurfacePoint::new(-120.0, 45.0),
        });
        let _ = s.zoom_in();

        let first = s.fit().unwrap();
        let second = s.fit().unwrap();
        assert_eq!(first, second);
        assert_eq!(s.transform(), first.transform);
    }

    #[test]
    fn small_image_fits_above_max_and_first_zoom_clamps() {
        let mut s = session();
        let fitted = s.set_image(PixelSize::new(50, 40)).unwrap().transform;
        assert_eq!(fitted, ViewTransform::centered(10.0));

        assert_eq!(s.zoom_in().unwrap().transform.scale, SCALE_MAX);
    }

    #[test]
    fn invalid_config_rejected() {
        let config: ViewerConfig = serde_json::from_str(r#"{"scale_min": 6.0}"#).unwrap();
        let err = ViewerSession::new(config, PixelSize::new(600, 400)).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(_)));
    }

    #[test]
    fn empty_initial_surface_rejected() {
        let err = ViewerSession::new(ViewerConfig::default(), PixelSize::new(0, 400)).unwrap_err();
        assert_eq!(
            err,
            ViewerError::InvalidSurface {
                width: 0,
                height: 400
            }
        );
    }

    #[test]
    fn default_session_zooms_within_bounds() {
        let mut s = ViewerSession::default();
        assert_eq!(s.surface(), PixelSize::new(600, 400));
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();
        assert!((s.zoom_in().unwrap().transform.scale - 0.55).abs() < 1e-9);
    }

    #[test]
    fn resize_refits_by_default() {
        let mut s = session();
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();
        let _ = s.zoom_in();

        let redraw = s.set_surface(PixelSize::new(1200, 800)).unwrap();
        assert_eq!(redraw.unwrap().transform, ViewTransform::centered(1.0));
    }

    #[test]
    fn resize_ignored_when_configured() {
        let config = ViewerConfig {
            resize_policy: ResizePolicy::Ignore,
            ..ViewerConfig::default()
        };
        let mut s = ViewerSession::new(config, PixelSize::new(600, 400)).unwrap();
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();

        assert!(s.set_surface(PixelSize::new(900, 900)).unwrap().is_none());
        assert_eq!(s.surface(), PixelSize::new(900, 900));
        assert_eq!(s.transform(), ViewTransform::centered(0.5));
    }

    #[test]
    fn resize_to_same_size_is_noop() {
        let mut s = session();
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();
        assert!(s.set_surface(PixelSize::new(600, 400)).unwrap().is_none());
    }

    #[test]
    fn resize_rejects_empty_surface() {
        let mut s = session();
        assert!(s.set_surface(PixelSize::new(0, 10)).is_err());
        assert_eq!(s.surface(), PixelSize::new(600, 400));
    }

    #[test]
    fn clear_image_stops_input() {
        let mut s = session();
        let _ = s.set_image(PixelSize::new(1200, 800)).unwrap();
        s.clear_image();
        assert!(s.image().is_none());
        assert!(s.zoom_in().is_none());
    }
}
