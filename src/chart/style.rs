use serde::{Deserialize, Serialize};

use super::ChartKind;

/// Rendering knobs shared by the four chart renderers. The defaults give
/// the classic 12×6-inch wide charts (10×8 for the heatmap) rasterized at
/// 100 px/inch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub heatmap_width: u32,
    pub heatmap_height: u32,
    pub margin: u32,
    pub caption_size: u32,
    pub label_size: u32,
    pub line_width: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width: 1200,
            height: 600,
            heatmap_width: 1000,
            heatmap_height: 800,
            margin: 20,
            caption_size: 28,
            label_size: 16,
            line_width: 2,
        }
    }
}

impl ChartStyle {
    /// Raster size for the given chart type.
    pub(crate) fn dimensions(&self, kind: ChartKind) -> (u32, u32) {
        match kind {
            ChartKind::CorrelationHeatmap => (self.heatmap_width, self.heatmap_height),
            _ => (self.width, self.height),
        }
    }

    pub(crate) fn caption_font(&self) -> (&'static str, u32) {
        ("sans-serif", self.caption_size)
    }

    pub(crate) fn label_font(&self) -> (&'static str, u32) {
        ("sans-serif", self.label_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_gets_its_own_dimensions() {
        let style = ChartStyle::default();
        assert_eq!(style.dimensions(ChartKind::TimeSeries), (1200, 600));
        assert_eq!(style.dimensions(ChartKind::AnnualSales), (1200, 600));
        assert_eq!(style.dimensions(ChartKind::CorrelationHeatmap), (1000, 800));
    }
}
