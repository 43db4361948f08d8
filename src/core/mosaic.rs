//! Mosaic compositing: combine several rasters onto one grid spanning their
//! union. The first input fixes cell size and projection; inputs are sampled
//! at output cell centres (nearest neighbour) and nodata never contributes.
use ndarray::{Array2, Zip};

use crate::core::raster::Raster;
use crate::error::{Error, Result};
use crate::types::MosaicMethod;

pub fn composite(inputs: &[Raster], method: MosaicMethod) -> Result<Raster> {
    let first = inputs
        .first()
        .ok_or_else(|| Error::Processing("mosaic requires at least one input".into()))?;

    let extent = inputs
        .iter()
        .skip(1)
        .fold(first.extent(), |acc, r| acc.union(&r.extent()));
    let cell_size = first.cell_width();

    let mut out = Raster::empty(&extent, cell_size, &first.projection);
    let shape = out.data.dim();
    let mut sums = Array2::<f64>::zeros(shape);
    let mut counts = Array2::<u32>::zeros(shape);

    for input in inputs {
        for row in 0..shape.0 {
            for col in 0..shape.1 {
                let (x, y) = out.cell_center(row, col);
                let Some(v) = input.value_at(x, y) else {
                    continue;
                };
                let cell = &mut out.data[[row, col]];
                let empty = counts[[row, col]] == 0;
                match method {
                    MosaicMethod::First => {
                        if empty {
                            *cell = v;
                        }
                    }
                    MosaicMethod::Last => *cell = v,
                    MosaicMethod::Minimum => {
                        if empty || v < *cell {
                            *cell = v;
                        }
                    }
                    MosaicMethod::Maximum => {
                        if empty || v > *cell {
                            *cell = v;
                        }
                    }
                    MosaicMethod::Mean => sums[[row, col]] += v as f64,
                }
                counts[[row, col]] += 1;
            }
        }
    }

    if method == MosaicMethod::Mean {
        Zip::from(&mut out.data)
            .and(&sums)
            .and(&counts)
            .for_each(|cell, &sum, &n| {
                if n > 0 {
                    *cell = (sum / n as f64) as f32;
                }
            });
    }

    Ok(out)
}
