pub mod overlay_params;
