pub mod bar_chart;
pub mod kpi_card;
pub mod quote_table;
pub mod toast;
