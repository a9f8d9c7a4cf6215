mod application;
mod geocoder_field;
