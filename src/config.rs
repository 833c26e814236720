use std::{
    fmt::Display,
    fs::File,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use json::JsonValue;

use crate::{
    encoding::UnitWidth,
    error::{Result, ShadowError},
};

/// Crop applied to the finished relief.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverallShape {
    #[default]
    Square,
    /// Circular crop, slow to evaluate
    Circle,
}

impl OverallShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallShape::Square => "square",
            OverallShape::Circle => "circle",
        }
    }
}

impl FromStr for OverallShape {
    type Err = ShadowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "square" => Ok(OverallShape::Square),
            "circle" => Ok(OverallShape::Circle),
            _ => Err(ShadowError::invalid_parameter(format!(
                "overall shape must be \"square\" or \"circle\", got {:?}",
                s
            ))),
        }
    }
}

impl Display for OverallShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the generated model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub unit_width: UnitWidth,
    /// Blank pixels added on every side of both images
    pub border: usize,
    /// Bit used for the border cells
    pub border_fill: bool,
    /// Extra plastic at the bottom, in z steps
    pub base_height: f64,
    /// Printer nozzle width in mm
    pub printer_nozzle_size: f64,
    pub overall_shape: OverallShape,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            unit_width: UnitWidth::default(),
            border: 2,
            border_fill: false,
            base_height: 40.0,
            printer_nozzle_size: 0.4,
            overall_shape: OverallShape::Square,
        }
    }
}

/// Values set on the command line, each one replaces the configured value when present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub unit_width: Option<usize>,
    pub border: Option<usize>,
    /// `0` or `1`
    pub border_fill: Option<u8>,
    pub base_height: Option<f64>,
    pub printer_nozzle_size: Option<f64>,
    pub overall_shape: Option<OverallShape>,
}

impl ModelConfig {
    /// Largest border accepted, in pixels.
    pub const MAX_BORDER: usize = 1024;

    pub fn z_step_height(&self) -> f64 {
        self.unit_width.z_step_height()
    }

    /// Check the values that can't be enforced by their types.
    pub fn validate(&self) -> Result {
        if self.border > Self::MAX_BORDER {
            return Err(ShadowError::invalid_parameter(format!(
                "border must be at most {}, got {}",
                Self::MAX_BORDER,
                self.border
            )));
        }
        if !self.base_height.is_finite() {
            return Err(ShadowError::invalid_parameter("base height must be finite"));
        }
        if !(self.printer_nozzle_size.is_finite() && self.printer_nozzle_size > 0.0) {
            return Err(ShadowError::invalid_parameter(
                "printer nozzle size must be a positive number",
            ));
        }
        Ok(())
    }

    /// Overlay the keys present in a JSON document on top of `self`.
    ///
    /// Unknown keys are ignored.
    pub fn merge_json(mut self, json_string: &str) -> Result<Self> {
        let json = json::parse(json_string)
            .map_err(|e| ShadowError::invalid_parameter(format!("config is not JSON: {}", e)))?;
        if !json.is_object() {
            return Err(ShadowError::invalid_parameter("config must be a JSON object"));
        }

        if let Some(value) = field(&json, "unit_width", JsonValue::as_usize)? {
            self.unit_width = UnitWidth::new(value)?;
        }
        if let Some(value) = field(&json, "border", JsonValue::as_usize)? {
            self.border = value;
        }
        if let Some(value) = field(&json, "border_fill", JsonValue::as_u8)? {
            self.border_fill = parse_bit(value)?;
        }
        if let Some(value) = field(&json, "base_height", JsonValue::as_f64)? {
            self.base_height = value;
        }
        if let Some(value) = field(&json, "printer_nozzle_size", JsonValue::as_f64)? {
            self.printer_nozzle_size = value;
        }
        if let Some(value) = field(&json, "overall_shape", JsonValue::as_str)? {
            self.overall_shape = value.parse()?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Apply the values present in `overrides` on top of `self`.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(unit) = overrides.unit_width {
            self.unit_width = UnitWidth::new(unit)?;
        }
        if let Some(border) = overrides.border {
            self.border = border;
        }
        if let Some(fill) = overrides.border_fill {
            self.border_fill = parse_bit(fill)?;
        }
        if let Some(base_height) = overrides.base_height {
            self.base_height = base_height;
        }
        if let Some(nozzle) = overrides.printer_nozzle_size {
            self.printer_nozzle_size = nozzle;
        }
        if let Some(shape) = overrides.overall_shape {
            self.overall_shape = shape;
        }

        self.validate()?;
        Ok(self)
    }

    /// Defaults, overlaid with the config file at `path` if any, then with `overrides`.
    pub fn resolve<P: AsRef<Path>>(path: Option<P>, overrides: &ConfigOverrides) -> Result<Self> {
        let config = match path {
            Some(path) => ModelConfig::read_config(path)?,
            None => ModelConfig::default(),
        };
        config.with_overrides(overrides)
    }

    pub fn to_json(&self) -> String {
        let mut data = JsonValue::new_object();

        data["unit_width"] = self.unit_width.get().into();
        data["border"] = self.border.into();
        data["border_fill"] = u8::from(self.border_fill).into();
        data["base_height"] = self.base_height.into();
        data["printer_nozzle_size"] = self.printer_nozzle_size.into();
        data["overall_shape"] = self.overall_shape.as_str().into();

        data.pretty(2)
    }

    /// Defaults overlaid with the config file at `path`.
    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<ModelConfig> {
        let mut file = File::open(path)?;
        let mut json_string = String::new();
        file.read_to_string(&mut json_string)?;

        ModelConfig::default().merge_json(&json_string)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        let mut file = File::create(path)?;
        file.write_all(self.to_json().as_bytes())?;
        Ok(())
    }
}

/// Border bit given as `0` or `1`.
pub fn parse_bit(value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ShadowError::invalid_parameter(format!(
            "border fill must be 0 or 1, got {}",
            value
        ))),
    }
}

fn field<'j, T>(
    json: &'j JsonValue,
    key: &str,
    read: impl Fn(&'j JsonValue) -> Option<T>,
) -> Result<Option<T>> {
    let value = &json[key];
    if value.is_null() {
        return Ok(None);
    }
    match read(value) {
        Some(val) => Ok(Some(val)),
        None => Err(ShadowError::invalid_parameter(format!(
            "Couldn't parse {}",
            key
        ))),
    }
}
