//! Browser-free host for the signature pad.
//!
//! Element ids map to display rectangles and every surface is a
//! [`RasterSurface`]. Each element is a numbered node, so removing or
//! re-rendering one under the same id is visible to a later bind. Listener
//! registration is only recorded, since input is fed to the pad directly.

use std::collections::HashMap;

use firma_core::{
    DeviceTransform, PadError, PadHost, PadResult, Rect, Segment, StrokeStyle, Surface,
};

use crate::backend::raster::RasterSurface;

/// A raster surface tagged with the element it was created for.
pub struct HeadlessSurface {
    element_id: String,
    node: u64,
    raster: RasterSurface,
}

impl HeadlessSurface {
    /// Id of the element this surface stands for.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// The underlying raster surface.
    #[must_use]
    pub fn raster(&self) -> &RasterSurface {
        &self.raster
    }
}

impl Surface for HeadlessSurface {
    fn configure(&mut self, transform: &DeviceTransform, style: &StrokeStyle) -> PadResult<()> {
        self.raster.configure(transform, style)
    }

    fn clear(&mut self) {
        self.raster.clear();
    }

    fn draw_segment(&mut self, segment: &Segment) {
        self.raster.draw_segment(segment);
    }

    fn to_data_url(&self) -> PadResult<String> {
        self.raster.to_data_url()
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.raster.pixel_size()
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    id: u64,
    rect: Rect,
}

/// In-memory page layout with a fixed device pixel ratio.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    elements: HashMap<String, Node>,
    next_node: u64,
    device_pixel_ratio: f64,
    listening: bool,
    attach_count: usize,
    detach_count: usize,
}

impl HeadlessHost {
    /// Create a host with no elements.
    #[must_use]
    pub fn new(device_pixel_ratio: f64) -> Self {
        Self {
            elements: HashMap::new(),
            next_node: 0,
            device_pixel_ratio,
            listening: false,
            attach_count: 0,
            detach_count: 0,
        }
    }

    /// Add an element laid out at `rect`.
    #[must_use]
    pub fn with_element(mut self, id: &str, rect: Rect) -> Self {
        self.set_element_rect(id, rect);
        self
    }

    /// Move or resize an element, as a window resize would. An unknown id
    /// adds a new element.
    pub fn set_element_rect(&mut self, id: &str, rect: Rect) {
        match self.elements.get_mut(id) {
            Some(node) => node.rect = rect,
            None => self.insert_node(id, rect),
        }
    }

    /// Take an element off the page.
    pub fn remove_element(&mut self, id: &str) -> bool {
        self.elements.remove(id).is_some()
    }

    /// Replace an element with a new node under the same id and layout, as a
    /// modal that re-renders its markup would.
    pub fn rerender_element(&mut self, id: &str) -> bool {
        match self.elements.get(id).map(|node| node.rect) {
            Some(rect) => {
                self.insert_node(id, rect);
                true
            }
            None => false,
        }
    }

    fn insert_node(&mut self, id: &str, rect: Rect) {
        self.next_node += 1;
        self.elements.insert(
            id.to_string(),
            Node {
                id: self.next_node,
                rect,
            },
        );
    }

    /// Change the reported device pixel ratio.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// Whether listeners are currently attached.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Times listeners were attached.
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Times listeners were detached.
    #[must_use]
    pub fn detach_count(&self) -> usize {
        self.detach_count
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PadHost for HeadlessHost {
    type Surface = HeadlessSurface;

    fn locate_surface(&mut self, target_id: &str) -> PadResult<HeadlessSurface> {
        let node = self
            .elements
            .get(target_id)
            .ok_or_else(|| PadError::ElementNotFound(target_id.to_string()))?;
        Ok(HeadlessSurface {
            element_id: target_id.to_string(),
            node: node.id,
            raster: RasterSurface::new(),
        })
    }

    fn same_element(&self, bound: &HeadlessSurface, located: &HeadlessSurface) -> bool {
        bound.node == located.node
    }

    fn display_rect(&self, surface: &HeadlessSurface) -> Rect {
        self.elements
            .get(&surface.element_id)
            .filter(|node| node.id == surface.node)
            .map(|node| node.rect)
            .unwrap_or_default()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn attach_listeners(&mut self, _surface: &HeadlessSurface) -> PadResult<()> {
        if self.listening {
            return Err(PadError::Listener("listeners already attached".to_string()));
        }
        self.listening = true;
        self.attach_count += 1;
        Ok(())
    }

    fn detach_listeners(&mut self) {
        if self.listening {
            self.listening = false;
            self.detach_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_element_is_not_found() {
        let mut host = HeadlessHost::default();
        assert!(matches!(
            host.locate_surface("sig-canvas"),
            Err(PadError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_display_rect_follows_layout_changes() {
        let mut host =
            HeadlessHost::new(2.0).with_element("sig-canvas", Rect::new(0.0, 0.0, 300.0, 150.0));
        let surface = host.locate_surface("sig-canvas").expect("located");
        assert_eq!(surface.element_id(), "sig-canvas");

        host.set_element_rect("sig-canvas", Rect::new(5.0, 5.0, 100.0, 50.0));
        assert_eq!(host.display_rect(&surface), Rect::new(5.0, 5.0, 100.0, 50.0));
    }

    #[test]
    fn test_rerender_makes_a_new_node() {
        let mut host =
            HeadlessHost::default().with_element("sig-canvas", Rect::new(0.0, 0.0, 300.0, 150.0));
        let first = host.locate_surface("sig-canvas").expect("located");
        let again = host.locate_surface("sig-canvas").expect("located");
        assert!(host.same_element(&first, &again));

        assert!(host.rerender_element("sig-canvas"));
        let fresh = host.locate_surface("sig-canvas").expect("located");
        assert!(!host.same_element(&first, &fresh));
        // The stale node no longer has a layout box.
        assert_eq!(host.display_rect(&first), Rect::default());
        assert_eq!(host.display_rect(&fresh), Rect::new(0.0, 0.0, 300.0, 150.0));
    }

    #[test]
    fn test_removed_element_is_not_found() {
        let mut host = HeadlessHost::default().with_element("sig-canvas", Rect::default());
        assert!(host.remove_element("sig-canvas"));
        assert!(!host.remove_element("sig-canvas"));
        assert!(!host.rerender_element("sig-canvas"));
        assert!(matches!(
            host.locate_surface("sig-canvas"),
            Err(PadError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_double_attach_is_an_error() {
        let mut host = HeadlessHost::default().with_element("sig-canvas", Rect::default());
        let surface = host.locate_surface("sig-canvas").expect("located");
        host.attach_listeners(&surface).expect("first attach");
        assert!(host.attach_listeners(&surface).is_err());
        assert_eq!(host.attach_count(), 1);

        host.detach_listeners();
        host.detach_listeners();
        assert_eq!(host.detach_count(), 1);
        assert!(!host.is_listening());
    }
}
