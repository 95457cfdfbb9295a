pub(crate) use self::widgets::SessionDisplay;

mod widgets;
