use egui::{Color32, Painter, Pos2, Shape, Stroke as EguiStroke};
use log::warn;

use crate::error::PathParseError;
use crate::stroke::StrokeStyle;

/// Something that can paint path-command strings
pub trait PathRenderer {
    fn draw_path(&mut self, d: &str, style: &StrokeStyle);
}

/// Split path commands into polylines, one per move-to.
///
/// Only absolute `M` and `L` commands are understood, each followed by an
/// `x,y` pair.
pub fn parse_path(d: &str) -> Result<Vec<Vec<Pos2>>, PathParseError> {
    let mut polylines: Vec<Vec<Pos2>> = Vec::new();
    let mut tokens = d.split_whitespace();

    while let Some(command) = tokens.next() {
        let letter = match command {
            "M" => 'M',
            "L" => 'L',
            other => return Err(PathParseError::UnknownCommand(other.to_owned())),
        };
        let coord = tokens.next().ok_or(PathParseError::MissingCoordinate(letter))?;
        let pos = parse_coordinate(coord)?;

        match polylines.last_mut() {
            Some(line) if letter == 'L' => line.push(pos),
            // A line-to without a preceding move-to starts its own polyline.
            _ => polylines.push(vec![pos]),
        }
    }

    Ok(polylines)
}

fn parse_coordinate(token: &str) -> Result<Pos2, PathParseError> {
    let bad = || PathParseError::BadCoordinate(token.to_owned());
    let (x, y) = token.split_once(',').ok_or_else(bad)?;
    let x = x.parse::<f32>().map_err(|_| bad())?;
    let y = y.parse::<f32>().map_err(|_| bad())?;
    Ok(Pos2::new(x, y))
}

/// Parse `#rrggbb` / `#rrggbbaa`, falling back to black
pub fn parse_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or_else(|_| {
        warn!("Invalid stroke colour {hex:?}, using black");
        Color32::BLACK
    })
}

/// Paints paths onto an egui surface whose top-left corner is `origin`
pub struct PainterRenderer<'a> {
    painter: &'a Painter,
    origin: Pos2,
}

impl<'a> PainterRenderer<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }
}

impl PathRenderer for PainterRenderer<'_> {
    fn draw_path(&mut self, d: &str, style: &StrokeStyle) {
        let polylines = match parse_path(d) {
            Ok(polylines) => polylines,
            Err(err) => {
                warn!("Skipping unrenderable path: {err}");
                return;
            }
        };

        let color = parse_color(&style.stroke);
        let offset = self.origin.to_vec2();
        let round_caps = style.stroke_linecap == "round";

        for line in polylines {
            let points: Vec<Pos2> = line.into_iter().map(|p| p + offset).collect();
            if points.len() >= 2 {
                self.painter.add(Shape::line(points.clone(), EguiStroke::new(style.stroke_width, color)));
            }
            if round_caps || points.len() == 1 {
                for cap in [points.first(), points.last()].into_iter().flatten() {
                    self.painter.circle_filled(*cap, style.stroke_width / 2.0, color);
                }
            }
        }
    }
}

/// Records what would have been painted. Useful for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub paths: Vec<(String, StrokeStyle)>,
}

impl PathRenderer for RecordingRenderer {
    fn draw_path(&mut self, d: &str, style: &StrokeStyle) {
        self.paths.push((d.to_owned(), style.clone()));
    }
}
