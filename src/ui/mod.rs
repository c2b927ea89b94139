/// egui rendering: sidebar/top-bar widgets and chart drawing.
pub mod panels;
pub mod plot;
