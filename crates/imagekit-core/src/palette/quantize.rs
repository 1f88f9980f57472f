//! Palette quantizers.
//!
//! [`MedianCut`] is the default: deterministic, and it never returns two
//! identical entries. [`NeuQuantizer`] wraps the `color_quant` neural-net
//! quantizer for large samples.

use std::collections::HashMap;

use color_quant::NeuQuant;

use super::Rgb;

/// Builds a palette from a flat sample of RGB triples.
pub trait Quantizer {
    /// Return at most `desired_color_count` colors.
    ///
    /// Fewer colors are returned only when the sample does not contain
    /// enough distinct colors. An empty sample yields an empty palette.
    fn quantize(&self, sample: &[Rgb], desired_color_count: usize) -> Vec<Rgb>;
}

/// Median-cut quantizer over the distinct colors of the sample.
///
/// Boxes are split on their widest channel at the population median until the
/// requested count is reached. Each output color is the population-weighted
/// mean of its box; entries are ordered by population, largest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCut;

#[derive(Debug)]
struct ColorBox {
    /// Distinct colors with their pixel counts.
    colors: Vec<(Rgb, u64)>,
    population: u64,
}

impl ColorBox {
    fn new(colors: Vec<(Rgb, u64)>) -> Self {
        let population = colors.iter().map(|(_, count)| count).sum();
        Self { colors, population }
    }

    /// Widest channel and its range.
    fn widest_channel(&self) -> (usize, u8) {
        (0..3)
            .map(|channel| {
                let (min, max) = self.colors.iter().fold((u8::MAX, u8::MIN), |(lo, hi), (c, _)| {
                    let v = c.to_array()[channel];
                    (lo.min(v), hi.max(v))
                });
                (channel, max.saturating_sub(min))
            })
            .max_by_key(|&(channel, range)| (range, std::cmp::Reverse(channel)))
            .unwrap_or((0, 0))
    }

    fn can_split(&self) -> bool {
        self.colors.len() > 1
    }

    /// Split on the widest channel. Both halves are non-empty and separated by
    /// a threshold on that channel.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.colors
            .sort_unstable_by_key(|(c, _)| (c.to_array()[channel], *c));

        let half = self.population / 2;
        let mut seen = 0;
        let mut median = 0;
        for (i, (_, count)) in self.colors.iter().enumerate() {
            seen += count;
            if seen > half {
                median = i;
                break;
            }
        }

        let value_at = |i: usize| self.colors[i].0.to_array()[channel];
        let pivot = value_at(median);
        let first = value_at(0);

        // Cut where the channel value changes so equal values stay together.
        let cut = if pivot == first {
            (0..self.colors.len())
                .find(|&i| value_at(i) > pivot)
                .unwrap_or(self.colors.len() - 1)
        } else {
            (0..=median)
                .find(|&i| value_at(i) == pivot)
                .unwrap_or(median)
        };

        let upper = self.colors.split_off(cut);
        (ColorBox::new(self.colors), ColorBox::new(upper))
    }

    fn mean(&self) -> Rgb {
        let mut sums = [0u64; 3];
        for (color, count) in &self.colors {
            for (sum, v) in sums.iter_mut().zip(color.to_array()) {
                *sum += v as u64 * count;
            }
        }
        let population = self.population.max(1);
        let avg = |sum: u64| ((sum + population / 2) / population) as u8;
        Rgb::new(avg(sums[0]), avg(sums[1]), avg(sums[2]))
    }
}

impl MedianCut {
    fn histogram(sample: &[Rgb]) -> Vec<(Rgb, u64)> {
        let mut counts: HashMap<Rgb, u64> = HashMap::new();
        for &color in sample {
            *counts.entry(color).or_default() += 1;
        }
        let mut colors: Vec<_> = counts.into_iter().collect();
        colors.sort_unstable();
        colors
    }
}

impl Quantizer for MedianCut {
    fn quantize(&self, sample: &[Rgb], desired_color_count: usize) -> Vec<Rgb> {
        if sample.is_empty() || desired_color_count == 0 {
            return Vec::new();
        }

        let mut boxes = vec![ColorBox::new(Self::histogram(sample))];

        while boxes.len() < desired_color_count {
            let candidate = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.can_split())
                .max_by_key(|(i, b)| (b.widest_channel().1, b.population, std::cmp::Reverse(*i)))
                .map(|(i, _)| i);

            let Some(index) = candidate else {
                break;
            };
            let (lower, upper) = boxes.swap_remove(index).split();
            boxes.push(lower);
            boxes.push(upper);
        }

        boxes.sort_by(|a, b| b.population.cmp(&a.population).then(a.mean().cmp(&b.mean())));
        boxes.iter().map(ColorBox::mean).collect()
    }
}

/// Quantizer backed by `color_quant`'s NeuQuant.
///
/// Small samples, or samples with no more distinct colors than requested, are
/// handed to [`MedianCut`]. NeuQuant may converge several neurons on the same
/// color, so duplicates are removed and the palette can come back short.
#[derive(Debug, Clone, Copy)]
pub struct NeuQuantizer {
    /// Sampling factor, 1 (every pixel, slowest) to 30 (fastest).
    pub sample_factor: i32,
}

impl NeuQuantizer {
    /// Samples below this many pixels go to median cut.
    pub const MIN_SAMPLE: usize = 4096;
}

impl Default for NeuQuantizer {
    fn default() -> Self {
        Self { sample_factor: 10 }
    }
}

impl Quantizer for NeuQuantizer {
    fn quantize(&self, sample: &[Rgb], desired_color_count: usize) -> Vec<Rgb> {
        if sample.len() < Self::MIN_SAMPLE
            || MedianCut::histogram(sample).len() <= desired_color_count
        {
            return MedianCut.quantize(sample, desired_color_count);
        }

        let rgba: Vec<u8> = sample
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, 255])
            .collect();
        let quant = NeuQuant::new(self.sample_factor.clamp(1, 30), desired_color_count, &rgba);

        let mut palette = Vec::with_capacity(desired_color_count);
        for chunk in quant.color_map_rgb().chunks_exact(3) {
            let color = Rgb::new(chunk[0], chunk[1], chunk[2]);
            if !palette.contains(&color) {
                palette.push(color);
            }
        }
        palette
    }
}
