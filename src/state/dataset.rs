/// Color palette for dataset boxes, assigned by input order.
pub const COLOR_PALETTE: [[u8; 4]; 12] = [
    [255, 0, 0, 255],     // Red
    [0, 255, 0, 255],     // Green
    [0, 0, 255, 255],     // Blue
    [255, 255, 0, 255],   // Yellow
    [255, 0, 255, 255],   // Magenta
    [0, 255, 255, 255],   // Cyan
    [255, 165, 0, 255],   // Orange
    [128, 0, 128, 255],   // Purple
    [0, 128, 0, 255],     // Dark Green
    [0, 0, 128, 255],     // Navy
    [255, 192, 203, 255], // Pink
    [165, 42, 42, 255],   // Brown
];

pub fn color_for_index(index: usize) -> [u8; 4] {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

static NEXT_DATASET_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

fn next_dataset_id() -> u64 {
    NEXT_DATASET_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
}

/// A named ordered list of numbers extracted from user input.
///
/// Created fresh on every generate action and never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub id: u64,
    pub name: String,
    pub values: Vec<f64>,
    pub color: [u8; 4],
}

impl Dataset {
    pub fn new(name: String, values: Vec<f64>, color: [u8; 4]) -> Self {
        Self {
            id: next_dataset_id(),
            name,
            values,
            color,
        }
    }

    pub fn color32(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            self.color[0],
            self.color[1],
            self.color[2],
            self.color[3],
        )
    }
}
