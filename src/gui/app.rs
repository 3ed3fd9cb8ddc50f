use crate::chart::{self, ChartState, model::Viewport};
use crate::config::{self, SizeConfig};
use crate::events::AppEvent;
use crate::geometry::Point;
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<ChartState>>,
    pub sizes: SizeConfig,
    pub css: gtk::CssProvider,
    pub drawing_area: gtk::DrawingArea,
}

impl AppModel {
    fn size_px(&self) -> i32 {
        let zoom = self.state.borrow().zoom();
        i32::try_from(self.sizes.pixels(zoom)).unwrap_or(i32::MAX)
    }

    fn graph_classes(&self) -> [&'static str; 2] {
        ["graph", self.state.borrow().zoom().css_class()]
    }
}

#[derive(Debug)]
pub enum AppMsg {
    Click(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (ChartState, SizeConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Arcgauge"),
            set_resizable: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        relm4::main_application().quit();
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                add_css_class: "content",
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    #[watch]
                    set_css_classes: &model.graph_classes(),
                    #[watch]
                    set_content_width: model.size_px(),
                    #[watch]
                    set_content_height: model.size_px(),

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Click(Point::new(x, y)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, sizes, rx) = init;

        let css = theme::load_css(&sizes);
        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            sizes,
            css,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = chart::draw(
                    cr,
                    &state_draw.borrow(),
                    &colors,
                    width as f64,
                    height as f64,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Click(point) => {
                let viewport = Viewport::fit(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                let mut state = self.state.borrow_mut();
                let target = state.hit_test(viewport.to_view_box(point));
                if state.click(target).should_redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state
                        .borrow_mut()
                        .reconfigure(new_config.breakdown, new_config.mode);
                    if self.sizes != new_config.size {
                        self.sizes = new_config.size;
                        self.css.load_from_data(&theme::stylesheet(&self.sizes));
                    }
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
