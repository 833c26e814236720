use std::path::PathBuf;

use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::Rng;

use crate::grid::Grid;

/// Scratch directory removed on drop.
pub struct Fixtures {
    dir: PathBuf,
}

impl Fixtures {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "shadowpunker-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn csv(&self, file: &str, text: &str) -> PathBuf {
        let path = self.path(file);
        std::fs::write(&path, text).unwrap();
        path
    }

    pub fn gray_png(&self, file: &str, rows: &[&[u8]]) -> PathBuf {
        let path = self.path(file);
        let mut image = GrayImage::new(rows[0].len() as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                image.put_pixel(x as u32, y as u32, Luma([*value]));
            }
        }
        image.save(&path).unwrap();
        path
    }

    pub fn rgb_png(&self, file: &str, rows: &[&[[u8; 3]]]) -> PathBuf {
        let path = self.path(file);
        let mut image = RgbImage::new(rows[0].len() as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                image.put_pixel(x as u32, y as u32, Rgb(*value));
            }
        }
        image.save(&path).unwrap();
        path
    }
}

impl Drop for Fixtures {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

pub fn random_samples(width: usize, height: usize, max: f64) -> Grid<f64> {
    let mut rng = rand::rng();
    let buffer = (0..width * height)
        .map(|_| rng.random_range(0.0..max))
        .collect();
    Grid::from_vec(width, height, buffer)
}
