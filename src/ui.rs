use kiss3d::conrod::{self, Labelable, Positionable, Sizeable, Widget};
use kiss3d::window::Window;

use crate::sandbox::{SandboxActionFlags, SandboxState};

const SIDEBAR_W: f64 = 200.0;
const ELEMENT_W: f64 = SIDEBAR_W - 20.0;
const ELEMENT_H: f64 = 20.0;
const VSPACE: f64 = 4.0;
const LEFT_MARGIN: f64 = 10.0;
const ALPHA: f32 = 0.9;

widget_ids! {
    pub struct ConrodIds {
        canvas,
        title,
        button_add_person,
        button_add_box,
        button_clear,
    }
}

pub struct SandboxUi {
    ids: ConrodIds,
}

impl SandboxUi {
    pub fn new(window: &mut Window) -> Self {
        use conrod::position::{Align, Direction, Padding, Position, Relative};

        let ui = window.conrod_ui_mut();
        ui.theme = conrod::Theme {
            name: "Sandbox theme".to_string(),
            padding: Padding::none(),
            x_position: Position::Relative(Relative::Align(Align::Start), None),
            y_position: Position::Relative(Relative::Direction(Direction::Backwards, 20.0), None),
            background_color: conrod::color::DARK_CHARCOAL.alpha(ALPHA),
            shape_color: conrod::color::LIGHT_CHARCOAL.alpha(ALPHA),
            border_color: conrod::color::BLACK.alpha(ALPHA),
            border_width: 0.0,
            label_color: conrod::color::WHITE.alpha(ALPHA),
            font_id: None,
            font_size_large: 15,
            font_size_medium: 11,
            font_size_small: 8,
            widget_styling: conrod::theme::StyleMap::default(),
            mouse_drag_threshold: 0.0,
            double_click_threshold: std::time::Duration::from_millis(500),
        };

        Self {
            ids: ConrodIds::new(ui.widget_id_generator()),
        }
    }

    pub fn update(&mut self, window: &mut Window, state: &mut SandboxState) {
        let ui_root = window.conrod_ui().window;
        let mut ui = window.conrod_ui_mut().set_widgets();

        conrod::widget::Canvas::new()
            .scroll_kids_vertically()
            .mid_right_with_margin(10.0)
            .w(SIDEBAR_W)
            .padded_h_of(ui_root, 10.0)
            .set(self.ids.canvas, &mut ui);

        conrod::widget::Text::new("Sandbox:")
            .top_left_with_margins_on(self.ids.canvas, VSPACE, LEFT_MARGIN)
            .set(self.ids.title, &mut ui);

        for _press in conrod::widget::Button::new()
            .label("Add person (P)")
            .align_middle_x_of(self.ids.canvas)
            .down_from(self.ids.title, VSPACE)
            .w_h(ELEMENT_W, ELEMENT_H)
            .set(self.ids.button_add_person, &mut ui)
        {
            state
                .action_flags
                .set(SandboxActionFlags::SPAWN_PERSON, true);
        }

        for _press in conrod::widget::Button::new()
            .label("Add box (B)")
            .align_middle_x_of(self.ids.canvas)
            .down_from(self.ids.button_add_person, VSPACE)
            .w_h(ELEMENT_W, ELEMENT_H)
            .set(self.ids.button_add_box, &mut ui)
        {
            state.action_flags.set(SandboxActionFlags::SPAWN_BOX, true);
        }

        for _press in conrod::widget::Button::new()
            .label("Clear (C)")
            .align_middle_x_of(self.ids.canvas)
            .down_from(self.ids.button_add_box, VSPACE)
            .w_h(ELEMENT_W, ELEMENT_H)
            .set(self.ids.button_clear, &mut ui)
        {
            state.action_flags.set(SandboxActionFlags::CLEAR_SCENE, true);
        }
    }
}
