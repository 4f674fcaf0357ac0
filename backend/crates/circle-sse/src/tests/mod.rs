mod broadcast_hub;
mod event_decoder;
