use schism_dom::BaseDocument;
use schism_traits::UnitRect;

use crate::ProbeError;

/// Measures a unit's box relative to a reference container
pub trait GeometryProbe {
    /// Both `unit` and `container` must be attached and laid out.
    fn measure(
        &self,
        doc: &BaseDocument,
        unit: usize,
        container: usize,
    ) -> Result<UnitRect, ProbeError>;
}

/// Reads the boxes computed by the document's last layout pass
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutProbe;

impl GeometryProbe for LayoutProbe {
    fn measure(
        &self,
        doc: &BaseDocument,
        unit: usize,
        container: usize,
    ) -> Result<UnitRect, ProbeError> {
        for id in [unit, container] {
            if !doc.is_attached(id) {
                return Err(ProbeError::Detached(id));
            }
        }

        let (unit_x, unit_y) = doc
            .absolute_position(unit)
            .ok_or(ProbeError::NotLaidOut(unit))?;
        let (container_x, container_y) = doc
            .absolute_position(container)
            .ok_or(ProbeError::NotLaidOut(container))?;
        let (width, height) = doc.layout_size(unit).ok_or(ProbeError::NotLaidOut(unit))?;

        Ok(UnitRect::new(
            width,
            height,
            unit_y - container_y,
            unit_x - container_x,
        ))
    }
}

/// Measure `unit` against `container` using the last layout pass
pub fn measure(doc: &BaseDocument, unit: usize, container: usize) -> Result<UnitRect, ProbeError> {
    LayoutProbe.measure(doc, unit, container)
}
