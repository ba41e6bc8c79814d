use super::chart::LineChart;
use super::error::ConvertError;
use plotters::prelude::*;
use serde::Serialize;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 600;

/// id of the script element holding the chart data as json
pub const DATA_ID: &str = "chart-data";

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

#[derive(Debug, Serialize)]
struct ChartData<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    points: Vec<PointData>,
}

/// one row of the table, with its position in the svg drawing
#[derive(Debug, Serialize)]
struct PointData {
    x: Option<f64>,
    y: Option<f64>,
    px: Option<i32>,
    py: Option<i32>,
}

/// Renders the chart to a standalone html document
pub fn render_html(chart: &LineChart) -> Result<String, ConvertError> {
    let (svg, pixels) = draw_svg(chart)?;
    let data = ChartData {
        title: &chart.title,
        x_desc: &chart.x_desc,
        y_desc: &chart.y_desc,
        points: chart
            .points
            .iter()
            .zip(pixels)
            .map(|(&(x, y), pixel)| PointData {
                x: finite(x),
                y: finite(y),
                px: pixel.map(|p| p.0),
                py: pixel.map(|p| p.1),
            })
            .collect(),
    };
    let json = serde_json::to_string(&data)
        .map_err(ConvertError::render)?
        .replace("</", "<\\/");

    let mut html = String::with_capacity(svg.len() + json.len() + 4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
    html.push_str(&escape_html(&chart.title));
    html.push_str("</title>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<div id=\"chart\">\n");
    html.push_str(&svg);
    html.push_str("\n</div>\n");
    html.push_str(CONTROLS);
    html.push_str("<script type=\"application/json\" id=\"");
    html.push_str(DATA_ID);
    html.push_str("\">");
    html.push_str(&json);
    html.push_str("</script>\n");
    html.push_str(SCRIPT);
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// draws the line series to an svg string, returning also the
/// pixel coordinates of each point (None for the gaps)
fn draw_svg(chart: &LineChart) -> Result<(String, Vec<Option<(i32, i32)>>), ConvertError> {
    let mut svg = String::new();
    let pixels = {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ConvertError::render)?;
        let mut ctx = ChartBuilder::on(&root)
            .margin(20)
            .caption(&chart.title, ("sans-serif", 28))
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(chart.x_range.clone(), chart.y_range.clone())
            .map_err(ConvertError::render)?;
        ctx.configure_mesh()
            .light_line_style(&RGBColor(235, 235, 235))
            .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18))
            .x_labels(12)
            .x_desc(chart.x_desc.as_str())
            .y_desc(chart.y_desc.as_str())
            .draw()
            .map_err(ConvertError::render)?;

        for segment in chart.segments() {
            let line = LineSeries::new(segment.iter().copied(), LINE_COLOR.stroke_width(2));
            ctx.draw_series(line).map_err(ConvertError::render)?;
        }

        let pixels = chart
            .points
            .iter()
            .map(|&(x, y)| {
                if x.is_finite() && y.is_finite() {
                    Some(ctx.backend_coord(&(x, y)))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        root.present().map_err(ConvertError::render)?;
        pixels
    };
    Ok((svg, pixels))
}

fn finite(v: f64) -> Option<f64> {
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 20px; }
#chart svg { max-width: 100%; height: auto; }
#tooltip { position: absolute; display: none; white-space: pre; pointer-events: none;
  background: rgba(255, 255, 255, 0.95); border: 1px solid #1f77b4; padding: 4px 8px; font-size: 13px; }
</style>
"#;

const CONTROLS: &str = r#"<label><input type="checkbox" id="show-points"> show points</label>
<div id="tooltip"></div>
"#;

const SCRIPT: &str = r##"<script>
(function () {
  var ns = "http://www.w3.org/2000/svg";
  var data = JSON.parse(document.getElementById("chart-data").textContent);
  var svg = document.querySelector("#chart svg");
  var tip = document.getElementById("tooltip");
  var pts = data.points.filter(function (p) { return p.px !== null; });

  var dots = document.createElementNS(ns, "g");
  dots.style.display = "none";
  pts.forEach(function (p) {
    var c = document.createElementNS(ns, "circle");
    c.setAttribute("cx", p.px);
    c.setAttribute("cy", p.py);
    c.setAttribute("r", 3);
    c.setAttribute("fill", "#1f77b4");
    dots.appendChild(c);
  });
  svg.appendChild(dots);
  document.getElementById("show-points").addEventListener("change", function (e) {
    dots.style.display = e.target.checked ? "" : "none";
  });

  var marker = document.createElementNS(ns, "circle");
  marker.setAttribute("r", 6);
  marker.setAttribute("fill", "none");
  marker.setAttribute("stroke", "#d62728");
  marker.setAttribute("stroke-width", 2);
  marker.style.display = "none";
  svg.appendChild(marker);

  svg.addEventListener("mousemove", function (evt) {
    if (pts.length === 0) { return; }
    var pt = svg.createSVGPoint();
    pt.x = evt.clientX;
    pt.y = evt.clientY;
    var m = pt.matrixTransform(svg.getScreenCTM().inverse());
    var best = pts[0];
    pts.forEach(function (p) {
      if (Math.abs(p.px - m.x) < Math.abs(best.px - m.x)) { best = p; }
    });
    marker.setAttribute("cx", best.px);
    marker.setAttribute("cy", best.py);
    marker.style.display = "";
    tip.textContent = data.x_desc + ": " + best.x + "\n" + data.y_desc + ": " + best.y;
    tip.style.left = (evt.pageX + 12) + "px";
    tip.style.top = (evt.pageY + 12) + "px";
    tip.style.display = "block";
  });
  svg.addEventListener("mouseleave", function () {
    marker.style.display = "none";
    tip.style.display = "none";
  });
})();
</script>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeRate;

    fn chart(points: &[(f64, f64)]) -> LineChart {
        LineChart::from_table(&TimeRate {
            elapsed: points.iter().map(|p| p.0).collect(),
            rate: points.iter().map(|p| p.1).collect(),
        })
        .unwrap()
    }

    #[test]
    fn document_is_standalone() {
        let html = render_html(&chart(&[(0., 100.), (1., 150.)])).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("id=\"chart-data\""));
        assert!(!html.contains("src=\"http"));
        assert!(html.contains("document.querySelector(\"#chart svg\")"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn tick_labels_are_rounded() {
        let (svg, _) = draw_svg(&chart(&[(0., 0.1), (1., 0.2), (2., 0.3)])).unwrap();
        assert!(!svg.contains("00000000"));
        assert!(!svg.contains("99999999"));
    }

    #[test]
    fn pixels_follow_the_axes() {
        let (_, pixels) = draw_svg(&chart(&[(0., 100.), (1., 150.), (2., 120.)])).unwrap();
        let pixels: Vec<(i32, i32)> = pixels.into_iter().map(Option::unwrap).collect();
        assert!(pixels[0].0 < pixels[1].0 && pixels[1].0 < pixels[2].0);
        // svg y grows downwards
        assert!(pixels[1].1 < pixels[2].1 && pixels[2].1 < pixels[0].1);
    }

    #[test]
    fn gaps_have_no_pixels() {
        let (_, pixels) = draw_svg(&chart(&[(0., 1.), (1., f64::NAN), (2., 3.)])).unwrap();
        assert!(pixels[0].is_some());
        assert!(pixels[1].is_none());
        assert!(pixels[2].is_some());
    }

    #[test]
    fn empty_chart_renders() {
        let html = render_html(&chart(&[])).unwrap();
        assert!(html.contains("\"points\":[]"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
