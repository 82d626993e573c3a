//! The render layer the tracked objects are placed on

use nav_types::WGS84;
use trash_types::prelude::GeodeticPosition;

/// The narrow slice of a globe renderer the tracker needs
pub trait RenderLayer {
    /// Refers to one renderable created by this layer
    type Handle: Copy;

    /// Creates a labelled point renderable at `position`
    fn add_renderable(&mut self, label: &str, position: WGS84<f64>) -> Self::Handle;

    /// Moves an existing renderable
    fn set_position(&mut self, handle: Self::Handle, position: WGS84<f64>);

    fn remove_all_renderables(&mut self);

    fn request_redraw(&mut self);
}

/// Converts a finite geodetic position to the layer's coordinate type.
///
/// Latitude is clamped to the poles and longitude wrapped, since the
/// conversion rejects values outside of the valid ranges.
pub fn wgs84(position: &GeodeticPosition) -> WGS84<f64> {
    let latitude = position.latitude.clamp(-90.0, 90.0);
    let mut longitude = position.longitude.rem_euclid(360.0);
    if longitude > 180.0 {
        longitude -= 360.0;
    }
    WGS84::from_degrees_and_meters(latitude, longitude, position.height)
}

#[derive(Clone, PartialEq, Debug)]
pub struct Placemark {
    pub label: String,
    pub position: WGS84<f64>,
    /// Number of times the placemark was moved after creation
    pub updates: usize,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlacemarkHandle(usize);

/// An in-memory layer, used when there's no renderer attached
#[derive(Clone, Debug, Default)]
pub struct HeadlessLayer {
    placemarks: Vec<Placemark>,
    redraws: usize,
}

impl HeadlessLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placemarks(&self) -> &[Placemark] {
        &self.placemarks
    }

    pub fn placemark(&self, handle: PlacemarkHandle) -> Option<&Placemark> {
        self.placemarks.get(handle.0)
    }

    pub fn redraw_requests(&self) -> usize {
        self.redraws
    }
}

impl RenderLayer for HeadlessLayer {
    type Handle = PlacemarkHandle;

    fn add_renderable(&mut self, label: &str, position: WGS84<f64>) -> Self::Handle {
        let handle = PlacemarkHandle(self.placemarks.len());
        self.placemarks.push(Placemark {
            label: label.to_owned(),
            position,
            updates: 0,
        });
        handle
    }

    fn set_position(&mut self, handle: Self::Handle, position: WGS84<f64>) {
        if let Some(p) = self.placemarks.get_mut(handle.0) {
            p.position = position;
            p.updates += 1;
        }
    }

    fn remove_all_renderables(&mut self) {
        self.placemarks.clear();
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
