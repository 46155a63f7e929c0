use dashboard_core::TrendBar;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 320;
const BAR_COLOR: RGBColor = RGBColor(168, 85, 247);

#[derive(Properties, PartialEq)]
pub struct DailyTrendChartProps {
    pub bars: Vec<TrendBar>,
    pub currency: String,
    pub loading: bool,
}

pub enum Msg {
    Redraw,
}

/// Canvas bar chart of the insight's daily spend series
pub struct DailyTrendChart {
    canvas_ref: NodeRef,
}

/// Top of the y axis: the busiest day, never below one
pub fn y_ceiling(bars: &[TrendBar]) -> f64 {
    bars.iter().map(|b| b.amount).fold(1.0_f64, f64::max) * 1.1
}

/// Horizontal extent of bar `index`, leaving a gap between neighbours
pub fn bar_span(index: usize) -> (f64, f64) {
    let left = index as f64;
    (left + 0.15, left + 0.85)
}

/// Axis label for the slot at `x`, if it falls on a bar
pub fn label_at(bars: &[TrendBar], x: f64) -> String {
    if x < 0.0 {
        return String::new();
    }
    bars.get(x.floor() as usize)
        .map(|b| b.label.clone())
        .unwrap_or_default()
}

impl Component for DailyTrendChart {
    type Message = Msg;
    type Properties = DailyTrendChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Redraw => {
                self.draw_chart(ctx.props());
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().bars.is_empty() {
            ctx.link().send_message(Msg::Redraw);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="panel">
                <div class="panel-header">
                    <h2 class="panel-title">{"Daily trends"}</h2>
                    <span class="panel-caption">{"Visual view of spending over time"}</span>
                </div>

                {if props.bars.is_empty() && props.loading {
                    html! { <div class="skeleton-block" /> }
                } else if props.bars.is_empty() {
                    html! { <p class="empty-state">{"Not enough data yet to draw a trend."}</p> }
                } else {
                    html! {
                        <div class="chart">
                            <canvas
                                ref={self.canvas_ref.clone()}
                                class="trend-canvas"
                                width={CANVAS_WIDTH.to_string()}
                                height={CANVAS_HEIGHT.to_string()}
                            ></canvas>
                        </div>
                    }
                }}
            </div>
        }
    }
}

impl DailyTrendChart {
    fn draw_chart(&self, props: &DailyTrendChartProps) {
        let bars = &props.bars;
        if bars.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..bars.len() as f64, 0.0..y_ceiling(bars))
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let currency = props.currency.clone();
        let x_labels = bars.len().min(10);
        if chart
            .configure_mesh()
            .disable_x_mesh()
            .y_label_formatter(&|v| format!("{}{:.0}", currency, v))
            .x_label_formatter(&|x| label_at(bars, *x))
            .x_labels(x_labels)
            .y_labels(6)
            .label_style(("sans-serif", 12, &RGBColor(100, 116, 139)))
            .axis_style(&RGBColor(226, 232, 240))
            .bold_line_style(&RGBColor(241, 245, 249))
            .draw()
            .is_err()
        {
            return;
        }

        let series = bars.iter().enumerate().map(|(index, bar)| {
            let (left, right) = bar_span(index);
            Rectangle::new([(left, 0.0), (right, bar.amount)], BAR_COLOR.filled())
        });
        if chart.draw_series(series).is_err() {
            return;
        }

        let _ = root.present();
    }
}
