use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

/// Everything needed to draw one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub tension: Option<f64>,
    pub fill: bool,
    pub show_legend: bool,
}

/// Opaque id of a live chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChartHandle(u64);

/// A chart instance currently alive on a surface.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveChart {
    pub handle: ChartHandle,
    pub canvas: String,
    pub spec: ChartSpec,
}

/// The charting library boundary: create and destroy instances on canvases.
pub trait ChartSurface: Send {
    fn create(&mut self, canvas: &str, spec: ChartSpec) -> ChartHandle;

    /// Tear down an instance. Unknown handles are ignored.
    fn destroy(&mut self, handle: ChartHandle);

    fn active(&self) -> Vec<ActiveChart>;

    /// Instances torn down since the surface was created.
    fn destroyed_count(&self) -> u64;
}

/// In-process chart surface that keeps live instances and their specs.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    next_id: u64,
    live: BTreeMap<ChartHandle, ActiveChart>,
    destroyed: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn live_on(&self, canvas: &str) -> usize {
        self.live.values().filter(|c| c.canvas == canvas).count()
    }
}

impl ChartSurface for ChartRegistry {
    fn create(&mut self, canvas: &str, spec: ChartSpec) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(
            handle,
            ActiveChart {
                handle,
                canvas: canvas.to_string(),
                spec,
            },
        );
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn active(&self) -> Vec<ActiveChart> {
        self.live.values().cloned().collect()
    }

    fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}
